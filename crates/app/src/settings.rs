//! Handles settings for the application. Configuration is written in
//! `khata.toml`, with `KHATA_*` environment variables layered on top.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "khata";

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Database::Sqlite("./khata.db".to_string())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
    pub language: String,
    pub fallback_language: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            language: "en".to_string(),
            fallback_language: "bn".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub database: Database,
}

impl Settings {
    pub fn new(path: Option<&str>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)).required(false))
            .add_source(Environment::with_prefix("KHATA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
