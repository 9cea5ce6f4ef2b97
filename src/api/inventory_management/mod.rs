pub(crate) mod access;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get_inventory;
pub(crate) mod list;
pub(crate) mod models;
pub(crate) mod update;
