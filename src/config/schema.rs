use std::path::Path;

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::catalog::DEFAULT_DB;

#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct SessionCatalogConfig {
    #[serde(default)]
    pub catalog: Catalog,
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct Catalog {
    /// Keep table names as typed instead of lowercasing them.
    pub case_sensitive: bool,
    /// Root under which databases without an explicit location are placed.
    pub warehouse_path: String,
    pub default_database: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            warehouse_path: "./warehouse".to_string(),
            default_database: DEFAULT_DB.to_string(),
        }
    }
}

pub fn validate_config(
    config: SessionCatalogConfig,
) -> Result<SessionCatalogConfig, ConfigError> {
    if config.catalog.default_database.is_empty() {
        Err(ConfigError::Message(
            "The default database name can not be empty".to_string(),
        ))
    } else if config.catalog.warehouse_path.is_empty() {
        Err(ConfigError::Message(
            "The warehouse path can not be empty".to_string(),
        ))
    } else {
        Ok(config)
    }
}

pub fn load_config(path: &Path) -> Result<SessionCatalogConfig, ConfigError> {
    let path = path.to_str().ok_or_else(|| {
        ConfigError::Message(format!("Error parsing path {}", path.display()))
    })?;
    let config = Config::builder().add_source(File::with_name(path));

    config.build()?.try_deserialize().and_then(validate_config)
}

// Load a config from a string (to test our structs are defined correctly)
pub fn load_config_from_string(
    config_str: &str,
    skip_validation: bool,
) -> Result<SessionCatalogConfig, ConfigError> {
    let config =
        Config::builder().add_source(File::from_str(config_str, FileFormat::Toml));

    if skip_validation {
        config.build()?.try_deserialize()
    } else {
        config.build()?.try_deserialize().and_then(validate_config)
    }
}
