//! In-memory `Store` for unit tests. It enforces the same unique
//! constraints as the migrations and rolls back by restoring a snapshot.

use std::cell::{Cell, RefCell};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use diesel::result::{DatabaseErrorKind, Error};
use diesel::QueryResult;

use super::models::{
    FieldConfig, FieldConfigChanges, Inventory, InventoryChanges, InventoryFilter, Item,
    NewFieldConfig, NewInventory, NewItem, NewUser, Tag, User, UserChanges,
};
use super::Store;
use crate::service::ServiceError;

#[derive(Clone, Default)]
struct State {
    ticks: i64,
    next_id: i32,
    users: Vec<User>,
    inventories: Vec<Inventory>,
    categories: Vec<String>,
    tags: Vec<Tag>,
    inventory_tags: Vec<(i32, i32)>,
    inventory_users: Vec<(i32, i32)>,
    field_configs: Vec<FieldConfig>,
    items: Vec<Item>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn now(&mut self) -> NaiveDateTime {
        self.ticks += 1;
        NaiveDate::from_ymd_opt(2022, 6, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid base timestamp")
            + Duration::seconds(self.ticks)
    }
}

fn unique_violation(constraint: &str) -> Error {
    Error::DatabaseError(
        DatabaseErrorKind::UniqueViolation,
        Box::new(format!(
            "duplicate key value violates unique constraint \"{}\"",
            constraint
        )),
    )
}

fn contains(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(&query.to_lowercase())
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    state: RefCell<State>,
    fail_field_inserts: Cell<bool>,
    race_next_update: Cell<bool>,
    tag_queries: Cell<usize>,
}

impl MemoryStore {
    pub(crate) fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Makes every following `insert_field_configs` call fail.
    pub(crate) fn fail_field_inserts(&self) {
        self.fail_field_inserts.set(true);
    }

    /// Lets another writer bump the version of the target inventory right
    /// before the next `update_inventory_if_version` runs its write.
    pub(crate) fn race_next_update(&self) {
        self.race_next_update.set(true);
    }

    /// How many tag lookups have reached the store.
    pub(crate) fn tag_queries(&self) -> usize {
        self.tag_queries.get()
    }

    pub(crate) fn add_user(&self, name: &str) -> User {
        self.upsert_user(&NewUser {
            sub: format!("sub-{}", name),
            username: name.to_string(),
            email: format!("{}@example.com", name),
        })
        .expect("user insert")
    }

    pub(crate) fn add_admin(&self, name: &str) -> User {
        let user = self.add_user(name);
        self.update_users(
            &[user.id],
            &UserChanges {
                role: Some("admin".to_string()),
                ..UserChanges::default()
            },
        )
        .expect("role update");
        User {
            role: "admin".to_string(),
            ..user
        }
    }

    pub(crate) fn add_inventory(&self, owner_id: i32, is_public: bool) -> Inventory {
        self.insert_inventory(&NewInventory {
            title: "Inventory".to_string(),
            description: String::new(),
            image_url: None,
            owner_id,
            is_public,
            category: None,
            custom_id_format: None,
        })
        .expect("inventory insert")
    }

    /// Sets the stored version directly, bypassing the optimistic guard.
    pub(crate) fn force_version(&self, inventory_id: i32, version: i32) {
        let mut state = self.state.borrow_mut();
        if let Some(inventory) = state
            .inventories
            .iter_mut()
            .find(|inventory| inventory.id == inventory_id)
        {
            inventory.version = version;
        }
    }

    pub(crate) fn tag_count(&self, name: &str) -> usize {
        self.state
            .borrow()
            .tags
            .iter()
            .filter(|tag| tag.name == name)
            .count()
    }

    pub(crate) fn categories(&self) -> Vec<String> {
        self.state.borrow().categories.clone()
    }
}

impl Store for MemoryStore {
    fn atomically<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce() -> Result<T, ServiceError>,
    {
        let snapshot = self.state.borrow().clone();
        let result = f();
        if result.is_err() {
            *self.state.borrow_mut() = snapshot;
        }
        result
    }

    fn upsert_user(&self, user: &NewUser) -> QueryResult<User> {
        let mut state = self.state.borrow_mut();
        if let Some(existing) = state.users.iter_mut().find(|u| u.sub == user.sub) {
            existing.username = user.username.clone();
            existing.email = user.email.clone();
            return Ok(existing.clone());
        }

        let created = User {
            id: state.next_id(),
            sub: user.sub.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            status: "active".to_string(),
            role: "user".to_string(),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    fn find_user(&self, user_id: i32) -> QueryResult<Option<User>> {
        Ok(self
            .state
            .borrow()
            .users
            .iter()
            .find(|user| user.id == user_id)
            .cloned())
    }

    fn users_except(&self, user_id: i32) -> QueryResult<Vec<User>> {
        let mut users = self
            .state
            .borrow()
            .users
            .iter()
            .filter(|user| user.id != user_id)
            .cloned()
            .collect::<Vec<_>>();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    fn list_users(&self) -> QueryResult<Vec<User>> {
        let mut users = self.state.borrow().users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    fn delete_users(&self, user_ids: &[i32]) -> QueryResult<usize> {
        let owned = self
            .state
            .borrow()
            .inventories
            .iter()
            .filter(|inventory| user_ids.contains(&inventory.owner_id))
            .map(|inventory| (inventory.owner_id, inventory.id))
            .collect::<Vec<_>>();
        for (owner_id, inventory_id) in owned {
            self.delete_owned_inventories(owner_id, &[inventory_id])?;
        }

        let mut state = self.state.borrow_mut();
        let before = state.users.len();
        state.users.retain(|user| !user_ids.contains(&user.id));
        state.items.retain(|item| !user_ids.contains(&item.created_by));
        state
            .inventory_users
            .retain(|(_, user_id)| !user_ids.contains(user_id));
        Ok(before - state.users.len())
    }

    fn update_users(&self, user_ids: &[i32], changes: &UserChanges) -> QueryResult<usize> {
        let mut state = self.state.borrow_mut();
        let mut updated = 0;
        for user in state.users.iter_mut().filter(|user| user_ids.contains(&user.id)) {
            if let Some(status) = &changes.status {
                user.status = status.clone();
            }
            if let Some(role) = &changes.role {
                user.role = role.clone();
            }
            updated += 1;
        }
        Ok(updated)
    }

    fn insert_inventory(&self, inventory: &NewInventory) -> QueryResult<Inventory> {
        let mut state = self.state.borrow_mut();
        let timestamp = state.now();
        let created = Inventory {
            id: state.next_id(),
            title: inventory.title.clone(),
            description: inventory.description.clone(),
            image_url: inventory.image_url.clone(),
            owner_id: inventory.owner_id,
            is_public: inventory.is_public,
            category: inventory.category.clone(),
            custom_id_format: inventory.custom_id_format.clone(),
            version: 1,
            created_at: timestamp,
            updated_at: timestamp,
        };
        state.inventories.push(created.clone());
        Ok(created)
    }

    fn find_inventory(&self, inventory_id: i32) -> QueryResult<Option<Inventory>> {
        Ok(self
            .state
            .borrow()
            .inventories
            .iter()
            .find(|inventory| inventory.id == inventory_id)
            .cloned())
    }

    fn list_inventories(&self, filter: InventoryFilter) -> QueryResult<Vec<Inventory>> {
        let state = self.state.borrow();
        let mut found = state
            .inventories
            .iter()
            .filter(|inventory| match filter {
                InventoryFilter::All => true,
                InventoryFilter::OwnedBy(user_id) => inventory.owner_id == user_id,
                InventoryFilter::SharedWith(user_id) => state
                    .inventory_users
                    .contains(&(inventory.id, user_id)),
                InventoryFilter::PublicExcept(user_id) => {
                    inventory.is_public && inventory.owner_id != user_id
                }
            })
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(found)
    }

    fn update_inventory_if_version(
        &self,
        inventory_id: i32,
        expected_version: i32,
        changes: &InventoryChanges,
    ) -> QueryResult<usize> {
        let mut state = self.state.borrow_mut();
        if self.race_next_update.replace(false) {
            if let Some(inventory) = state
                .inventories
                .iter_mut()
                .find(|inventory| inventory.id == inventory_id)
            {
                inventory.version += 1;
            }
        }

        let timestamp = state.now();
        let inventory = match state
            .inventories
            .iter_mut()
            .find(|inventory| inventory.id == inventory_id && inventory.version == expected_version)
        {
            Some(inventory) => inventory,
            None => return Ok(0),
        };

        inventory.title = changes.title.clone();
        inventory.description = changes.description.clone();
        inventory.image_url = changes.image_url.clone();
        inventory.is_public = changes.is_public;
        inventory.category = changes.category.clone();
        inventory.custom_id_format = changes.custom_id_format.clone();
        inventory.version += 1;
        inventory.updated_at = timestamp;
        Ok(1)
    }

    fn delete_owned_inventories(&self, owner_id: i32, inventory_ids: &[i32]) -> QueryResult<usize> {
        let mut state = self.state.borrow_mut();
        let doomed = state
            .inventories
            .iter()
            .filter(|inventory| inventory.owner_id == owner_id && inventory_ids.contains(&inventory.id))
            .map(|inventory| inventory.id)
            .collect::<Vec<_>>();

        state.inventories.retain(|inventory| !doomed.contains(&inventory.id));
        state.field_configs.retain(|field| !doomed.contains(&field.inventory_id));
        state.items.retain(|item| !doomed.contains(&item.inventory_id));
        state.inventory_tags.retain(|(inventory_id, _)| !doomed.contains(inventory_id));
        state.inventory_users.retain(|(inventory_id, _)| !doomed.contains(inventory_id));
        Ok(doomed.len())
    }

    fn grant_exists(&self, inventory_id: i32, user_id: i32) -> QueryResult<bool> {
        Ok(self
            .state
            .borrow()
            .inventory_users
            .contains(&(inventory_id, user_id)))
    }

    fn granted_user_ids(&self, inventory_id: i32) -> QueryResult<Vec<i32>> {
        let mut user_ids = self
            .state
            .borrow()
            .inventory_users
            .iter()
            .filter(|(granted, _)| *granted == inventory_id)
            .map(|(_, user_id)| *user_id)
            .collect::<Vec<_>>();
        user_ids.sort_unstable();
        Ok(user_ids)
    }

    fn grant_access(&self, inventory_id: i32, user_ids: &[i32]) -> QueryResult<usize> {
        let mut state = self.state.borrow_mut();
        let mut inserted = 0;
        for &user_id in user_ids {
            if !state.inventory_users.contains(&(inventory_id, user_id)) {
                state.inventory_users.push((inventory_id, user_id));
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    fn revoke_access(&self, inventory_id: i32, user_ids: &[i32]) -> QueryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.inventory_users.len();
        state
            .inventory_users
            .retain(|(granted, user_id)| !(*granted == inventory_id && user_ids.contains(user_id)));
        Ok(before - state.inventory_users.len())
    }

    fn ensure_category(&self, name: &str) -> QueryResult<()> {
        let mut state = self.state.borrow_mut();
        if !state.categories.iter().any(|category| category == name) {
            state.categories.push(name.to_string());
        }
        Ok(())
    }

    fn search_categories(&self, query: &str, limit: i64) -> QueryResult<Vec<String>> {
        let mut found = self
            .state
            .borrow()
            .categories
            .iter()
            .filter(|category| contains(category, query))
            .cloned()
            .collect::<Vec<_>>();
        found.sort();
        found.truncate(limit.max(0) as usize);
        Ok(found)
    }

    fn find_tags(&self, names: &[String]) -> QueryResult<Vec<Tag>> {
        Ok(self
            .state
            .borrow()
            .tags
            .iter()
            .filter(|tag| names.contains(&tag.name))
            .cloned()
            .collect())
    }

    fn insert_missing_tags(&self, names: &[String]) -> QueryResult<usize> {
        let mut state = self.state.borrow_mut();
        let mut inserted = 0;
        for name in names {
            if !state.tags.iter().any(|tag| &tag.name == name) {
                let id = state.next_id();
                state.tags.push(Tag {
                    id,
                    name: name.clone(),
                });
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    fn upsert_tag(&self, name: &str) -> QueryResult<Tag> {
        let mut state = self.state.borrow_mut();
        if let Some(tag) = state.tags.iter().find(|tag| tag.name == name) {
            return Ok(tag.clone());
        }

        let tag = Tag {
            id: state.next_id(),
            name: name.to_string(),
        };
        state.tags.push(tag.clone());
        Ok(tag)
    }

    fn search_tags(&self, query: &str, limit: i64) -> QueryResult<Vec<String>> {
        let mut found = self
            .state
            .borrow()
            .tags
            .iter()
            .filter(|tag| contains(&tag.name, query))
            .map(|tag| tag.name.clone())
            .collect::<Vec<_>>();
        found.sort();
        found.truncate(limit.max(0) as usize);
        Ok(found)
    }

    fn inventory_tags(&self, inventory_id: i32) -> QueryResult<Vec<Tag>> {
        self.tag_queries.set(self.tag_queries.get() + 1);
        let state = self.state.borrow();
        let mut found = state
            .tags
            .iter()
            .filter(|tag| state.inventory_tags.contains(&(inventory_id, tag.id)))
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    fn tags_for_inventories(&self, inventory_ids: &[i32]) -> QueryResult<Vec<(i32, Tag)>> {
        self.tag_queries.set(self.tag_queries.get() + 1);
        let state = self.state.borrow();
        let mut found = state
            .inventory_tags
            .iter()
            .filter(|(inventory_id, _)| inventory_ids.contains(inventory_id))
            .filter_map(|&(inventory_id, tag_id)| {
                state
                    .tags
                    .iter()
                    .find(|tag| tag.id == tag_id)
                    .map(|tag| (inventory_id, tag.clone()))
            })
            .collect::<Vec<_>>();
        found.sort_by(|a, b| a.1.name.cmp(&b.1.name));
        Ok(found)
    }

    fn replace_inventory_tags(&self, inventory_id: i32, tag_ids: &[i32]) -> QueryResult<()> {
        let mut state = self.state.borrow_mut();
        state
            .inventory_tags
            .retain(|(linked, _)| *linked != inventory_id);
        for &tag_id in tag_ids {
            if state.inventory_tags.contains(&(inventory_id, tag_id)) {
                return Err(unique_violation("inventory_tags_pkey"));
            }
            state.inventory_tags.push((inventory_id, tag_id));
        }
        Ok(())
    }

    fn field_configs(&self, inventory_id: i32) -> QueryResult<Vec<FieldConfig>> {
        let mut found = self
            .state
            .borrow()
            .field_configs
            .iter()
            .filter(|field| field.inventory_id == inventory_id)
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by_key(|field| (field.position, field.id));
        Ok(found)
    }

    fn delete_field_configs(&self, inventory_id: i32, slots: &[String]) -> QueryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.field_configs.len();
        state
            .field_configs
            .retain(|field| !(field.inventory_id == inventory_id && slots.contains(&field.slot)));
        Ok(before - state.field_configs.len())
    }

    fn update_field_config(
        &self,
        inventory_id: i32,
        slot: &str,
        changes: &FieldConfigChanges,
    ) -> QueryResult<usize> {
        let mut state = self.state.borrow_mut();
        match state
            .field_configs
            .iter_mut()
            .find(|field| field.inventory_id == inventory_id && field.slot == slot)
        {
            Some(field) => {
                field.title = changes.title.clone();
                field.description = changes.description.clone();
                field.field_type = changes.field_type.clone();
                field.visible_in_table = changes.visible_in_table;
                field.position = changes.position;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn insert_field_configs(&self, fields: &[NewFieldConfig]) -> QueryResult<usize> {
        if self.fail_field_inserts.get() {
            return Err(Error::QueryBuilderError("injected field insert failure".into()));
        }

        let mut state = self.state.borrow_mut();
        for field in fields {
            if state
                .field_configs
                .iter()
                .any(|existing| existing.inventory_id == field.inventory_id && existing.slot == field.slot)
            {
                return Err(unique_violation("field_configs_inventory_id_slot_key"));
            }

            let id = state.next_id();
            state.field_configs.push(FieldConfig {
                id,
                inventory_id: field.inventory_id,
                slot: field.slot.clone(),
                title: field.title.clone(),
                description: field.description.clone(),
                field_type: field.field_type.clone(),
                visible_in_table: field.visible_in_table,
                position: field.position,
            });
        }
        Ok(fields.len())
    }

    fn find_item_by_custom_id(
        &self,
        inventory_id: i32,
        custom_id: &str,
    ) -> QueryResult<Option<Item>> {
        Ok(self
            .state
            .borrow()
            .items
            .iter()
            .find(|item| item.inventory_id == inventory_id && item.custom_id == custom_id)
            .cloned())
    }

    fn insert_item(&self, item: &NewItem) -> QueryResult<Item> {
        let mut state = self.state.borrow_mut();
        if state
            .items
            .iter()
            .any(|existing| existing.inventory_id == item.inventory_id && existing.custom_id == item.custom_id)
        {
            return Err(unique_violation("items_inventory_id_custom_id_key"));
        }

        let created_at = state.now();
        let created = Item {
            id: state.next_id(),
            inventory_id: item.inventory_id,
            custom_id: item.custom_id.clone(),
            created_by: item.created_by,
            created_at,
            text1: item.text1.clone(),
            text2: item.text2.clone(),
            text3: item.text3.clone(),
            multiline1: item.multiline1.clone(),
            multiline2: item.multiline2.clone(),
            multiline3: item.multiline3.clone(),
            number1: item.number1,
            number2: item.number2,
            number3: item.number3,
            link1: item.link1.clone(),
            link2: item.link2.clone(),
            link3: item.link3.clone(),
            boolean1: item.boolean1,
            boolean2: item.boolean2,
            boolean3: item.boolean3,
        };
        state.items.push(created.clone());
        Ok(created)
    }

    fn list_items(&self, inventory_id: i32) -> QueryResult<Vec<Item>> {
        let mut found = self
            .state
            .borrow()
            .items
            .iter()
            .filter(|item| item.inventory_id == inventory_id)
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(found)
    }

    fn delete_items(&self, inventory_id: i32, item_ids: &[i32]) -> QueryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.items.len();
        state
            .items
            .retain(|item| !(item.inventory_id == inventory_id && item_ids.contains(&item.id)));
        Ok(before - state.items.len())
    }
}
