use serde::Deserialize;
use serde_json::Value;

use super::access::has_write_access;
use super::{is_unique_violation, Actor, ServiceError};
use crate::store::models::{Inventory, Item, NewItem};
use crate::store::Store;

/// Item body as submitted. Numeric and boolean slots arrive as loose JSON and
/// are coerced on insert; text and link slots pass through.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemInput {
    pub custom_id: String,
    pub text1: Option<String>,
    pub text2: Option<String>,
    pub text3: Option<String>,
    pub multiline1: Option<String>,
    pub multiline2: Option<String>,
    pub multiline3: Option<String>,
    pub number1: Option<Value>,
    pub number2: Option<Value>,
    pub number3: Option<Value>,
    pub link1: Option<String>,
    pub link2: Option<String>,
    pub link3: Option<String>,
    pub boolean1: Option<Value>,
    pub boolean2: Option<Value>,
    pub boolean3: Option<Value>,
}

fn coerce_number(slot: &str, value: Option<&Value>) -> Result<Option<f64>, ServiceError> {
    let invalid = || ServiceError::Validation(format!("{} must be a number", slot));

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number.as_f64().map(Some).ok_or_else(invalid),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(Some)
            .ok_or_else(invalid),
        Some(_) => Err(invalid()),
    }
}

fn coerce_boolean(slot: &str, value: Option<&Value>) -> Result<Option<bool>, ServiceError> {
    let invalid = || ServiceError::Validation(format!("{} must be a boolean", slot));

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(|number| Some(number != 0.0))
            .ok_or_else(invalid),
        Some(Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(invalid()),
        },
        Some(_) => Err(invalid()),
    }
}

impl ItemInput {
    fn into_new_item(self, inventory_id: i32, created_by: i32) -> Result<NewItem, ServiceError> {
        let custom_id = self.custom_id.trim().to_string();
        if custom_id.is_empty() {
            return Err(ServiceError::Validation("Custom ID must not be empty".to_string()));
        }

        Ok(NewItem {
            inventory_id,
            custom_id,
            created_by,
            number1: coerce_number("number1", self.number1.as_ref())?,
            number2: coerce_number("number2", self.number2.as_ref())?,
            number3: coerce_number("number3", self.number3.as_ref())?,
            boolean1: coerce_boolean("boolean1", self.boolean1.as_ref())?,
            boolean2: coerce_boolean("boolean2", self.boolean2.as_ref())?,
            boolean3: coerce_boolean("boolean3", self.boolean3.as_ref())?,
            text1: self.text1,
            text2: self.text2,
            text3: self.text3,
            multiline1: self.multiline1,
            multiline2: self.multiline2,
            multiline3: self.multiline3,
            link1: self.link1,
            link2: self.link2,
            link3: self.link3,
        })
    }
}

fn writable_inventory<S: Store>(
    store: &S,
    actor: &Actor,
    inventory_id: i32,
) -> Result<Inventory, ServiceError> {
    let inventory = store
        .find_inventory(inventory_id)?
        .ok_or(ServiceError::NotFound("Inventory not found"))?;

    if !has_write_access(store, actor, &inventory)? {
        return Err(ServiceError::Forbidden("No write access"));
    }

    Ok(inventory)
}

/// Inserts an item unless its custom id is taken in this inventory. The
/// lookup only gives a friendlier error; the unique index on
/// `(inventory_id, custom_id)` settles concurrent submissions.
pub fn create_item<S: Store>(
    store: &S,
    inventory_id: i32,
    actor: &Actor,
    input: ItemInput,
) -> Result<Item, ServiceError> {
    writable_inventory(store, actor, inventory_id)?;
    let new_item = input.into_new_item(inventory_id, actor.id)?;

    if store
        .find_item_by_custom_id(inventory_id, &new_item.custom_id)?
        .is_some()
    {
        return Err(ServiceError::Conflict("Custom ID already in use"));
    }

    let item = store.insert_item(&new_item).map_err(|err| {
        if is_unique_violation(&err) {
            ServiceError::Conflict("Custom ID already in use")
        } else {
            ServiceError::Database(err)
        }
    })?;

    log::info!(
        "user {} created item {} in inventory {}",
        actor.id,
        item.id,
        inventory_id
    );
    Ok(item)
}

pub fn list_items<S: Store>(store: &S, inventory_id: i32) -> Result<Vec<Item>, ServiceError> {
    store
        .find_inventory(inventory_id)?
        .ok_or(ServiceError::NotFound("Inventory not found"))?;

    Ok(store.list_items(inventory_id)?)
}

/// Deletes the listed items of one inventory; ids from other inventories
/// are skipped.
pub fn delete_items<S: Store>(
    store: &S,
    inventory_id: i32,
    actor: &Actor,
    item_ids: &[i32],
) -> Result<usize, ServiceError> {
    writable_inventory(store, actor, inventory_id)?;
    let deleted = store.delete_items(inventory_id, item_ids)?;
    log::info!(
        "user {} deleted {} item(s) from inventory {}",
        actor.id,
        deleted,
        inventory_id
    );
    Ok(deleted)
}
