pub(crate) mod inventory_management;
pub(crate) mod item_management;
pub(crate) mod metadata;
pub(crate) mod user_management;
