//! Inventory lifecycle, including the optimistic-concurrency update.
//!
//! An update presents the version the client last read. The version is
//! checked up front and again by the conditional write, so of two editors
//! starting from the same version exactly one commits and the other gets
//! `VersionConflict`. Nothing here retries.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::access::has_write_access;
use super::categories::ensure_category;
use super::fields::{apply_field_sync, plan_field_sync, FieldInput};
use super::tags::{create_or_get_tags, upsert_tags};
use super::{Actor, ServiceError};
use crate::store::models::{
    FieldConfig, Inventory, InventoryChanges, InventoryFilter, NewInventory, Tag, User,
};
use crate::store::Store;

/// Editable inventory attributes, shared by create and update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub custom_id_format: Option<Value>,
    #[serde(default)]
    pub fields: Vec<FieldInput>,
}

impl InventoryInput {
    fn validate(&self) -> Result<(), ServiceError> {
        if self.title.trim().is_empty() {
            return Err(ServiceError::Validation("Title must not be empty".to_string()));
        }
        Ok(())
    }

    fn changes(&self) -> InventoryChanges {
        InventoryChanges {
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            is_public: self.is_public,
            category: self.category.clone(),
            custom_id_format: self.custom_id_format.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryUpdate {
    #[serde(flatten)]
    pub input: InventoryInput,
    /// The version the client last read.
    pub version: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDetails {
    pub inventory: Inventory,
    pub fields: Vec<FieldConfig>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone)]
pub struct InventoryOverview {
    pub details: InventoryDetails,
    pub owner: Option<User>,
    pub granted_user_ids: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct InventorySummary {
    pub inventory: Inventory,
    pub tags: Vec<Tag>,
}

fn require_inventory<S: Store>(store: &S, inventory_id: i32) -> Result<Inventory, ServiceError> {
    store
        .find_inventory(inventory_id)?
        .ok_or(ServiceError::NotFound("Inventory not found"))
}

fn load_details<S: Store>(store: &S, inventory_id: i32) -> Result<InventoryDetails, ServiceError> {
    Ok(InventoryDetails {
        inventory: require_inventory(store, inventory_id)?,
        fields: store.field_configs(inventory_id)?,
        tags: store.inventory_tags(inventory_id)?,
    })
}

fn tag_ids(tags: &[Tag]) -> Vec<i32> {
    tags.iter().map(|tag| tag.id).collect()
}

pub fn create_inventory<S: Store>(
    store: &S,
    actor: &Actor,
    input: InventoryInput,
) -> Result<InventoryDetails, ServiceError> {
    input.validate()?;
    let plan = plan_field_sync(&[], &input.fields)?;

    store.atomically(|| {
        ensure_category(store, input.category.as_deref())?;
        let tags = create_or_get_tags(store, &input.tags)?;

        let inventory = store.insert_inventory(&NewInventory {
            title: input.title.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            owner_id: actor.id,
            is_public: input.is_public,
            category: input.category.clone(),
            custom_id_format: input.custom_id_format.clone(),
        })?;

        store.replace_inventory_tags(inventory.id, &tag_ids(&tags))?;
        apply_field_sync(store, inventory.id, &plan)?;

        log::info!("user {} created inventory {}", actor.id, inventory.id);
        load_details(store, inventory.id)
    })
}

/// Applies `update` to the inventory as one transaction:
/// 1. load the inventory and its fields (`NotFound`)
/// 2. check write access (`Forbidden`)
/// 3. compare versions (`VersionConflict`)
/// 4. ensure a changed category exists
/// 5. resolve tags
/// 6. write scalars, bump the version and replace tag links
/// 7. reconcile field configs by slot
/// 8. re-read the result
pub fn update_inventory<S: Store>(
    store: &S,
    inventory_id: i32,
    actor: &Actor,
    update: InventoryUpdate,
) -> Result<InventoryDetails, ServiceError> {
    let InventoryUpdate { input, version } = update;
    input.validate()?;

    store.atomically(|| {
        let inventory = require_inventory(store, inventory_id)?;
        let existing_fields = store.field_configs(inventory_id)?;

        if !has_write_access(store, actor, &inventory)? {
            log::warn!(
                "user {} denied write access to inventory {}",
                actor.id,
                inventory_id
            );
            return Err(ServiceError::Forbidden("No write access"));
        }

        if version != inventory.version {
            log::warn!(
                "stale update of inventory {}: submitted version {}, current {}",
                inventory_id,
                version,
                inventory.version
            );
            return Err(ServiceError::VersionConflict {
                current_version: inventory.version,
                fields: existing_fields,
            });
        }

        let plan = plan_field_sync(&existing_fields, &input.fields)?;

        if input.category.is_some() && input.category != inventory.category {
            ensure_category(store, input.category.as_deref())?;
        }

        let tags = upsert_tags(store, &input.tags)?;

        let written = store.update_inventory_if_version(inventory_id, version, &input.changes())?;
        if written == 0 {
            // Another writer committed between the check and the write.
            let current = require_inventory(store, inventory_id)?;
            log::warn!(
                "inventory {} changed underneath update: now at version {}",
                inventory_id,
                current.version
            );
            return Err(ServiceError::VersionConflict {
                current_version: current.version,
                fields: store.field_configs(inventory_id)?,
            });
        }

        store.replace_inventory_tags(inventory_id, &tag_ids(&tags))?;

        if !plan.is_empty() {
            apply_field_sync(store, inventory_id, &plan)?;
        }

        log::info!(
            "user {} updated inventory {} to version {}",
            actor.id,
            inventory_id,
            version + 1
        );
        load_details(store, inventory_id)
    })
}

pub fn get_inventory<S: Store>(
    store: &S,
    inventory_id: i32,
) -> Result<InventoryOverview, ServiceError> {
    let details = load_details(store, inventory_id)?;
    let owner = store.find_user(details.inventory.owner_id)?;
    let granted_user_ids = store.granted_user_ids(inventory_id)?;

    Ok(InventoryOverview {
        details,
        owner,
        granted_user_ids,
    })
}

pub fn list_inventories<S: Store>(
    store: &S,
    filter: InventoryFilter,
) -> Result<Vec<InventorySummary>, ServiceError> {
    let inventories = store.list_inventories(filter)?;
    let ids = inventories.iter().map(|inventory| inventory.id).collect::<Vec<_>>();

    let mut tags_by_inventory: HashMap<i32, Vec<Tag>> = HashMap::new();
    for (inventory_id, tag) in store.tags_for_inventories(&ids)? {
        tags_by_inventory.entry(inventory_id).or_default().push(tag);
    }

    Ok(inventories
        .into_iter()
        .map(|inventory| {
            let tags = tags_by_inventory.remove(&inventory.id).unwrap_or_default();
            InventorySummary { inventory, tags }
        })
        .collect())
}

pub fn inventory_fields<S: Store>(
    store: &S,
    inventory_id: i32,
) -> Result<Vec<FieldConfig>, ServiceError> {
    require_inventory(store, inventory_id)?;
    Ok(store.field_configs(inventory_id)?)
}

pub fn inventory_tags<S: Store>(store: &S, inventory_id: i32) -> Result<Vec<Tag>, ServiceError> {
    require_inventory(store, inventory_id)?;
    Ok(store.inventory_tags(inventory_id)?)
}

pub fn custom_id_format<S: Store>(
    store: &S,
    inventory_id: i32,
) -> Result<Option<Value>, ServiceError> {
    Ok(require_inventory(store, inventory_id)?.custom_id_format)
}

/// Deletes the listed inventories the actor owns; other ids are skipped.
pub fn delete_inventories<S: Store>(
    store: &S,
    actor: &Actor,
    inventory_ids: &[i32],
) -> Result<usize, ServiceError> {
    let deleted = store.delete_owned_inventories(actor.id, inventory_ids)?;
    log::info!(
        "user {} deleted {} of {} requested inventories",
        actor.id,
        deleted,
        inventory_ids.len()
    );
    Ok(deleted)
}
