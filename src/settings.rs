use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub google_client_id: String,
    pub allowed_origin: String,
    pub tag_search_limit: i64,
    pub category_search_limit: i64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("allowed_origin", "*")?
            .set_default("tag_search_limit", 20)?
            .set_default("category_search_limit", 40)?
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }
}
