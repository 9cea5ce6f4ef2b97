use diesel::dsl::{exists, now};
use diesel::pg::PgConnection;
use diesel::prelude::*;

use super::models::{
    FieldConfig, FieldConfigChanges, Inventory, InventoryChanges, InventoryFilter, Item,
    NewFieldConfig, NewInventory, NewInventoryTag, NewInventoryUser, NewItem, NewTag, NewUser, Tag,
    User, UserChanges,
};
use super::Store;
use crate::schema::{
    categories, field_configs, inventories, inventory_tags, inventory_users, items, tags, users,
};
use crate::service::ServiceError;

/// `%query%` with LIKE wildcards in the query escaped.
fn contains_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

impl Store for PgConnection {
    fn atomically<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce() -> Result<T, ServiceError>,
    {
        self.transaction(f)
    }

    fn upsert_user(&self, user: &NewUser) -> QueryResult<User> {
        diesel::insert_into(users::table)
            .values(user)
            .on_conflict(users::sub)
            .do_update()
            .set(user)
            .get_result(self)
    }

    fn find_user(&self, user_id: i32) -> QueryResult<Option<User>> {
        users::table.find(user_id).first(self).optional()
    }

    fn users_except(&self, user_id: i32) -> QueryResult<Vec<User>> {
        users::table
            .filter(users::id.ne(user_id))
            .order(users::username.asc())
            .load(self)
    }

    fn list_users(&self) -> QueryResult<Vec<User>> {
        users::table.order(users::username.asc()).load(self)
    }

    fn delete_users(&self, user_ids: &[i32]) -> QueryResult<usize> {
        diesel::delete(users::table.filter(users::id.eq_any(user_ids))).execute(self)
    }

    fn update_users(&self, user_ids: &[i32], changes: &UserChanges) -> QueryResult<usize> {
        diesel::update(users::table.filter(users::id.eq_any(user_ids)))
            .set(changes)
            .execute(self)
    }

    fn insert_inventory(&self, inventory: &NewInventory) -> QueryResult<Inventory> {
        diesel::insert_into(inventories::table)
            .values(inventory)
            .get_result(self)
    }

    fn find_inventory(&self, inventory_id: i32) -> QueryResult<Option<Inventory>> {
        inventories::table
            .find(inventory_id)
            .first(self)
            .optional()
    }

    fn list_inventories(&self, filter: InventoryFilter) -> QueryResult<Vec<Inventory>> {
        let query = inventories::table
            .order((inventories::created_at.desc(), inventories::id.desc()))
            .into_boxed();

        let query = match filter {
            InventoryFilter::All => query,
            InventoryFilter::OwnedBy(user_id) => query.filter(inventories::owner_id.eq(user_id)),
            InventoryFilter::SharedWith(user_id) => query.filter(
                inventories::id.eq_any(
                    inventory_users::table
                        .filter(inventory_users::user_id.eq(user_id))
                        .select(inventory_users::inventory_id),
                ),
            ),
            InventoryFilter::PublicExcept(user_id) => query.filter(
                inventories::is_public
                    .eq(true)
                    .and(inventories::owner_id.ne(user_id)),
            ),
        };

        query.load(self)
    }

    fn update_inventory_if_version(
        &self,
        inventory_id: i32,
        expected_version: i32,
        changes: &InventoryChanges,
    ) -> QueryResult<usize> {
        diesel::update(
            inventories::table
                .filter(inventories::id.eq(inventory_id))
                .filter(inventories::version.eq(expected_version)),
        )
        .set((
            changes,
            inventories::version.eq(inventories::version + 1),
            inventories::updated_at.eq(now),
        ))
        .execute(self)
    }

    fn delete_owned_inventories(&self, owner_id: i32, inventory_ids: &[i32]) -> QueryResult<usize> {
        diesel::delete(
            inventories::table
                .filter(inventories::owner_id.eq(owner_id))
                .filter(inventories::id.eq_any(inventory_ids)),
        )
        .execute(self)
    }

    fn grant_exists(&self, inventory_id: i32, user_id: i32) -> QueryResult<bool> {
        diesel::select(exists(
            inventory_users::table.find((inventory_id, user_id)),
        ))
        .get_result(self)
    }

    fn granted_user_ids(&self, inventory_id: i32) -> QueryResult<Vec<i32>> {
        inventory_users::table
            .filter(inventory_users::inventory_id.eq(inventory_id))
            .select(inventory_users::user_id)
            .order(inventory_users::user_id.asc())
            .load(self)
    }

    fn grant_access(&self, inventory_id: i32, user_ids: &[i32]) -> QueryResult<usize> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let grants = user_ids
            .iter()
            .map(|&user_id| NewInventoryUser {
                inventory_id,
                user_id,
            })
            .collect::<Vec<_>>();

        diesel::insert_into(inventory_users::table)
            .values(&grants)
            .on_conflict_do_nothing()
            .execute(self)
    }

    fn revoke_access(&self, inventory_id: i32, user_ids: &[i32]) -> QueryResult<usize> {
        diesel::delete(
            inventory_users::table
                .filter(inventory_users::inventory_id.eq(inventory_id))
                .filter(inventory_users::user_id.eq_any(user_ids)),
        )
        .execute(self)
    }

    fn ensure_category(&self, name: &str) -> QueryResult<()> {
        diesel::insert_into(categories::table)
            .values(categories::name.eq(name))
            .on_conflict(categories::name)
            .do_nothing()
            .execute(self)
            .map(|_| ())
    }

    fn search_categories(&self, query: &str, limit: i64) -> QueryResult<Vec<String>> {
        categories::table
            .filter(categories::name.ilike(contains_pattern(query)))
            .select(categories::name)
            .order(categories::name.asc())
            .limit(limit)
            .load(self)
    }

    fn find_tags(&self, names: &[String]) -> QueryResult<Vec<Tag>> {
        tags::table
            .filter(tags::name.eq_any(names))
            .select((tags::id, tags::name))
            .load(self)
    }

    fn insert_missing_tags(&self, names: &[String]) -> QueryResult<usize> {
        if names.is_empty() {
            return Ok(0);
        }

        let new_tags = names
            .iter()
            .map(|name| NewTag { name: name.as_str() })
            .collect::<Vec<_>>();

        diesel::insert_into(tags::table)
            .values(&new_tags)
            .on_conflict(tags::name)
            .do_nothing()
            .execute(self)
    }

    fn upsert_tag(&self, name: &str) -> QueryResult<Tag> {
        diesel::insert_into(tags::table)
            .values(&NewTag { name })
            .on_conflict(tags::name)
            .do_nothing()
            .execute(self)?;

        tags::table
            .filter(tags::name.eq(name))
            .select((tags::id, tags::name))
            .first(self)
    }

    fn search_tags(&self, query: &str, limit: i64) -> QueryResult<Vec<String>> {
        tags::table
            .filter(tags::name.ilike(contains_pattern(query)))
            .select(tags::name)
            .order(tags::name.asc())
            .limit(limit)
            .load(self)
    }

    fn inventory_tags(&self, inventory_id: i32) -> QueryResult<Vec<Tag>> {
        inventory_tags::table
            .inner_join(tags::table)
            .filter(inventory_tags::inventory_id.eq(inventory_id))
            .select((tags::id, tags::name))
            .order(tags::name.asc())
            .load(self)
    }

    fn tags_for_inventories(&self, inventory_ids: &[i32]) -> QueryResult<Vec<(i32, Tag)>> {
        if inventory_ids.is_empty() {
            return Ok(Vec::new());
        }

        inventory_tags::table
            .inner_join(tags::table)
            .filter(inventory_tags::inventory_id.eq_any(inventory_ids))
            .select((inventory_tags::inventory_id, (tags::id, tags::name)))
            .order(tags::name.asc())
            .load(self)
    }

    fn replace_inventory_tags(&self, inventory_id: i32, tag_ids: &[i32]) -> QueryResult<()> {
        diesel::delete(inventory_tags::table.filter(inventory_tags::inventory_id.eq(inventory_id)))
            .execute(self)?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let links = tag_ids
            .iter()
            .map(|&tag_id| NewInventoryTag {
                inventory_id,
                tag_id,
            })
            .collect::<Vec<_>>();

        diesel::insert_into(inventory_tags::table)
            .values(&links)
            .execute(self)
            .map(|_| ())
    }

    fn field_configs(&self, inventory_id: i32) -> QueryResult<Vec<FieldConfig>> {
        field_configs::table
            .filter(field_configs::inventory_id.eq(inventory_id))
            .order((field_configs::position.asc(), field_configs::id.asc()))
            .load(self)
    }

    fn delete_field_configs(&self, inventory_id: i32, slots: &[String]) -> QueryResult<usize> {
        if slots.is_empty() {
            return Ok(0);
        }

        diesel::delete(
            field_configs::table
                .filter(field_configs::inventory_id.eq(inventory_id))
                .filter(field_configs::slot.eq_any(slots)),
        )
        .execute(self)
    }

    fn update_field_config(
        &self,
        inventory_id: i32,
        slot: &str,
        changes: &FieldConfigChanges,
    ) -> QueryResult<usize> {
        diesel::update(
            field_configs::table
                .filter(field_configs::inventory_id.eq(inventory_id))
                .filter(field_configs::slot.eq(slot)),
        )
        .set(changes)
        .execute(self)
    }

    fn insert_field_configs(&self, fields: &[NewFieldConfig]) -> QueryResult<usize> {
        if fields.is_empty() {
            return Ok(0);
        }

        diesel::insert_into(field_configs::table)
            .values(fields)
            .execute(self)
    }

    fn find_item_by_custom_id(
        &self,
        inventory_id: i32,
        custom_id: &str,
    ) -> QueryResult<Option<Item>> {
        items::table
            .filter(items::inventory_id.eq(inventory_id))
            .filter(items::custom_id.eq(custom_id))
            .first(self)
            .optional()
    }

    fn insert_item(&self, item: &NewItem) -> QueryResult<Item> {
        diesel::insert_into(items::table)
            .values(item)
            .get_result(self)
    }

    fn list_items(&self, inventory_id: i32) -> QueryResult<Vec<Item>> {
        items::table
            .filter(items::inventory_id.eq(inventory_id))
            .order((items::created_at.desc(), items::id.desc()))
            .load(self)
    }

    fn delete_items(&self, inventory_id: i32, item_ids: &[i32]) -> QueryResult<usize> {
        diesel::delete(
            items::table
                .filter(items::inventory_id.eq(inventory_id))
                .filter(items::id.eq_any(item_ids)),
        )
        .execute(self)
    }
}
