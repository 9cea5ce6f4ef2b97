//! Persistence seam for the service layer.
//!
//! Service functions take any `S: Store` so the transaction boundary stays
//! explicit. Production code hands in the pooled `PgConnection`; tests use
//! the in-memory store.

#[cfg(test)]
pub(crate) mod memory;
pub(crate) mod models;
mod pg;

use diesel::QueryResult;

use crate::service::ServiceError;
use models::{
    FieldConfig, FieldConfigChanges, Inventory, InventoryChanges, InventoryFilter, Item,
    NewFieldConfig, NewInventory, NewItem, NewUser, Tag, User, UserChanges,
};

pub trait Store {
    /// Runs `f` as one atomic unit. Any `Err` returned by `f` discards every
    /// write made inside it.
    fn atomically<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce() -> Result<T, ServiceError>;

    fn upsert_user(&self, user: &NewUser) -> QueryResult<User>;
    fn find_user(&self, user_id: i32) -> QueryResult<Option<User>>;
    fn users_except(&self, user_id: i32) -> QueryResult<Vec<User>>;
    /// Ordered by username.
    fn list_users(&self) -> QueryResult<Vec<User>>;
    /// Owned inventories and created items go with the user.
    fn delete_users(&self, user_ids: &[i32]) -> QueryResult<usize>;
    fn update_users(&self, user_ids: &[i32], changes: &UserChanges) -> QueryResult<usize>;

    fn insert_inventory(&self, inventory: &NewInventory) -> QueryResult<Inventory>;
    fn find_inventory(&self, inventory_id: i32) -> QueryResult<Option<Inventory>>;
    /// Newest first.
    fn list_inventories(&self, filter: InventoryFilter) -> QueryResult<Vec<Inventory>>;
    /// Writes `changes` and bumps `version` by one, but only while the stored
    /// version still equals `expected_version`. Returns the number of rows
    /// written, so 0 means another writer got there first.
    fn update_inventory_if_version(
        &self,
        inventory_id: i32,
        expected_version: i32,
        changes: &InventoryChanges,
    ) -> QueryResult<usize>;
    fn delete_owned_inventories(&self, owner_id: i32, inventory_ids: &[i32]) -> QueryResult<usize>;

    fn grant_exists(&self, inventory_id: i32, user_id: i32) -> QueryResult<bool>;
    fn granted_user_ids(&self, inventory_id: i32) -> QueryResult<Vec<i32>>;
    /// Existing grants are left alone.
    fn grant_access(&self, inventory_id: i32, user_ids: &[i32]) -> QueryResult<usize>;
    fn revoke_access(&self, inventory_id: i32, user_ids: &[i32]) -> QueryResult<usize>;

    /// Creates the category unless one with exactly this name exists.
    fn ensure_category(&self, name: &str) -> QueryResult<()>;
    fn search_categories(&self, query: &str, limit: i64) -> QueryResult<Vec<String>>;

    fn find_tags(&self, names: &[String]) -> QueryResult<Vec<Tag>>;
    /// Inserts the given names, skipping any that already exist.
    fn insert_missing_tags(&self, names: &[String]) -> QueryResult<usize>;
    fn upsert_tag(&self, name: &str) -> QueryResult<Tag>;
    fn search_tags(&self, query: &str, limit: i64) -> QueryResult<Vec<String>>;
    fn inventory_tags(&self, inventory_id: i32) -> QueryResult<Vec<Tag>>;
    /// Tag links of several inventories in one query, as
    /// `(inventory_id, tag)` pairs ordered by tag name.
    fn tags_for_inventories(&self, inventory_ids: &[i32]) -> QueryResult<Vec<(i32, Tag)>>;
    fn replace_inventory_tags(&self, inventory_id: i32, tag_ids: &[i32]) -> QueryResult<()>;

    /// Ordered by position.
    fn field_configs(&self, inventory_id: i32) -> QueryResult<Vec<FieldConfig>>;
    fn delete_field_configs(&self, inventory_id: i32, slots: &[String]) -> QueryResult<usize>;
    fn update_field_config(
        &self,
        inventory_id: i32,
        slot: &str,
        changes: &FieldConfigChanges,
    ) -> QueryResult<usize>;
    fn insert_field_configs(&self, fields: &[NewFieldConfig]) -> QueryResult<usize>;

    fn find_item_by_custom_id(&self, inventory_id: i32, custom_id: &str)
        -> QueryResult<Option<Item>>;
    fn insert_item(&self, item: &NewItem) -> QueryResult<Item>;
    /// Newest first.
    fn list_items(&self, inventory_id: i32) -> QueryResult<Vec<Item>>;
    fn delete_items(&self, inventory_id: i32, item_ids: &[i32]) -> QueryResult<usize>;
}
