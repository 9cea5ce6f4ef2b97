use std::fmt::Debug;

use crate::schema::{
    field_configs, inventories, inventory_tags, inventory_users, items, tags, users,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

#[derive(Queryable, Debug, Clone)]
pub struct User {
    pub id: i32,
    pub sub: String,
    pub username: String,
    pub email: String,
    pub status: String,
    pub role: String,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[table_name = "users"]
pub struct NewUser {
    pub sub: String,
    pub username: String,
    pub email: String,
}

/// Admin edit of status and role. `None` leaves the column alone.
#[derive(AsChangeset, Debug, Clone, Default)]
#[table_name = "users"]
pub struct UserChanges {
    pub status: Option<String>,
    pub role: Option<String>,
}

#[derive(Queryable, Identifiable, Serialize, Debug, Clone, PartialEq)]
#[table_name = "inventories"]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub owner_id: i32,
    pub is_public: bool,
    pub category: Option<String>,
    pub custom_id_format: Option<Value>,
    pub version: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[table_name = "inventories"]
pub struct NewInventory {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub owner_id: i32,
    pub is_public: bool,
    pub category: Option<String>,
    pub custom_id_format: Option<Value>,
}

/// Scalar columns written by an inventory update. `version` and
/// `updated_at` are bumped by the store alongside these.
#[derive(AsChangeset, Debug, Clone)]
#[table_name = "inventories"]
#[changeset_options(treat_none_as_null = "true")]
pub struct InventoryChanges {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_public: bool,
    pub category: Option<String>,
    pub custom_id_format: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryFilter {
    All,
    OwnedBy(i32),
    SharedWith(i32),
    PublicExcept(i32),
}

#[derive(Queryable, Identifiable, Serialize, Debug, Clone, PartialEq)]
#[table_name = "field_configs"]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub id: i32,
    pub inventory_id: i32,
    pub slot: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub visible_in_table: bool,
    pub position: i32,
}

#[derive(Insertable, Debug, Clone)]
#[table_name = "field_configs"]
pub struct NewFieldConfig {
    pub inventory_id: i32,
    pub slot: String,
    pub title: String,
    pub description: String,
    pub field_type: String,
    pub visible_in_table: bool,
    pub position: i32,
}

/// Everything on a field config except its identity and slot.
#[derive(AsChangeset, Debug, Clone)]
#[table_name = "field_configs"]
pub struct FieldConfigChanges {
    pub title: String,
    pub description: String,
    pub field_type: String,
    pub visible_in_table: bool,
    pub position: i32,
}

#[derive(Queryable, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable, Debug)]
#[table_name = "tags"]
pub struct NewTag<'a> {
    pub name: &'a str,
}

#[derive(Insertable, Debug, Clone, Copy)]
#[table_name = "inventory_tags"]
pub struct NewInventoryTag {
    pub inventory_id: i32,
    pub tag_id: i32,
}

#[derive(Insertable, Debug, Clone, Copy)]
#[table_name = "inventory_users"]
pub struct NewInventoryUser {
    pub inventory_id: i32,
    pub user_id: i32,
}

#[derive(Queryable, Identifiable, Serialize, Debug, Clone, PartialEq)]
#[table_name = "items"]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i32,
    pub inventory_id: i32,
    pub custom_id: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub text1: Option<String>,
    pub text2: Option<String>,
    pub text3: Option<String>,
    pub multiline1: Option<String>,
    pub multiline2: Option<String>,
    pub multiline3: Option<String>,
    pub number1: Option<f64>,
    pub number2: Option<f64>,
    pub number3: Option<f64>,
    pub link1: Option<String>,
    pub link2: Option<String>,
    pub link3: Option<String>,
    pub boolean1: Option<bool>,
    pub boolean2: Option<bool>,
    pub boolean3: Option<bool>,
}

#[derive(Insertable, Debug, Clone, Default)]
#[table_name = "items"]
pub struct NewItem {
    pub inventory_id: i32,
    pub custom_id: String,
    pub created_by: i32,
    pub text1: Option<String>,
    pub text2: Option<String>,
    pub text3: Option<String>,
    pub multiline1: Option<String>,
    pub multiline2: Option<String>,
    pub multiline3: Option<String>,
    pub number1: Option<f64>,
    pub number2: Option<f64>,
    pub number3: Option<f64>,
    pub link1: Option<String>,
    pub link2: Option<String>,
    pub link3: Option<String>,
    pub boolean1: Option<bool>,
    pub boolean2: Option<bool>,
    pub boolean3: Option<bool>,
}
