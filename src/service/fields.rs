//! Custom field schema reconciliation.
//!
//! Field configs are diffed by `slot`, the client-chosen key that survives
//! edits, never by storage id or list position. Reordering entries only
//! rewrites their positions.

use std::collections::HashSet;

use serde::Deserialize;

use super::ServiceError;
use crate::store::models::{FieldConfig, FieldConfigChanges, NewFieldConfig};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Multiline,
    Number,
    Link,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Multiline => "multiline",
            FieldType::Number => "number",
            FieldType::Link => "link",
            FieldType::Boolean => "boolean",
        }
    }
}

/// One field definition as submitted by the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInput {
    pub slot: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub visible_in_table: bool,
    #[serde(default)]
    pub position: i32,
}

impl FieldInput {
    fn changes(&self) -> FieldConfigChanges {
        FieldConfigChanges {
            title: self.title.clone(),
            description: self.description.clone(),
            field_type: self.field_type.as_str().to_string(),
            visible_in_table: self.visible_in_table,
            position: self.position,
        }
    }

    fn new_config(&self, inventory_id: i32) -> NewFieldConfig {
        NewFieldConfig {
            inventory_id,
            slot: self.slot.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            field_type: self.field_type.as_str().to_string(),
            visible_in_table: self.visible_in_table,
            position: self.position,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct FieldSyncPlan {
    /// Slots of stored configs absent from the incoming list.
    pub to_delete: Vec<String>,
    /// Incoming entries whose slot is already stored.
    pub to_update: Vec<FieldInput>,
    /// Incoming entries with a slot not stored yet.
    pub to_create: Vec<FieldInput>,
}

impl FieldSyncPlan {
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_update.is_empty() && self.to_create.is_empty()
    }
}

/// Splits `incoming` against `existing` by slot. Rejects blank or repeated
/// slots, since a repeated slot leaves no defined winner.
pub fn plan_field_sync(
    existing: &[FieldConfig],
    incoming: &[FieldInput],
) -> Result<FieldSyncPlan, ServiceError> {
    let mut incoming_slots = HashSet::with_capacity(incoming.len());
    for field in incoming {
        if field.slot.trim().is_empty() {
            return Err(ServiceError::Validation("Field slot must not be empty".to_string()));
        }
        if !incoming_slots.insert(field.slot.as_str()) {
            return Err(ServiceError::Validation(format!(
                "Duplicate field slot: {}",
                field.slot
            )));
        }
    }

    let existing_slots = existing
        .iter()
        .map(|field| field.slot.as_str())
        .collect::<HashSet<_>>();

    let to_delete = existing
        .iter()
        .filter(|field| !incoming_slots.contains(field.slot.as_str()))
        .map(|field| field.slot.clone())
        .collect();

    let (to_update, to_create): (Vec<_>, Vec<_>) = incoming
        .iter()
        .cloned()
        .partition(|field| existing_slots.contains(field.slot.as_str()));

    Ok(FieldSyncPlan {
        to_delete,
        to_update,
        to_create,
    })
}

/// Writes a plan for `inventory_id`. Call inside the caller's transaction.
pub fn apply_field_sync<S: Store>(
    store: &S,
    inventory_id: i32,
    plan: &FieldSyncPlan,
) -> Result<(), ServiceError> {
    store.delete_field_configs(inventory_id, &plan.to_delete)?;

    for field in &plan.to_update {
        store.update_field_config(inventory_id, &field.slot, &field.changes())?;
    }

    let created = plan
        .to_create
        .iter()
        .map(|field| field.new_config(inventory_id))
        .collect::<Vec<_>>();
    store.insert_field_configs(&created)?;

    Ok(())
}
