pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod me;
pub(crate) mod models;
