//! Yamiko settings
//!
//! Settings live in a single `config.toml` with three tables, each backed by a
//! type implementing [`ConfigSection`]:
//!
//! - `[app]`: data directory, log level, storage quota, demo data
//! - `[reader]`: initial display settings for the reader
//! - `[catalog]`: paging, listing sizes and search tuning
//!
//! Missing files and missing keys fall back to defaults, writes are atomic, and
//! files from older releases are migrated on load.
//!
//! ```rust,no_run
//! use yamiko_config::ConfigManager;
//!
//! # fn main() -> Result<(), yamiko_config::ConfigError> {
//! let manager = ConfigManager::new()?;
//! let config = manager.load_with_env_overrides()?;
//! println!("{} titles per page", config.catalog.items_per_page);
//! # Ok(())
//! # }
//! ```

mod error;
mod manager;
mod migration;
mod persistence;
mod validation;

pub mod app_config;
mod catalog_config;
mod reader_config;

pub use app_config::{AppConfig, LogLevel, DEFAULT_STORAGE_QUOTA_BYTES};
pub use catalog_config::{CatalogConfig, SORT_NAMES};
pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{apply_env_overrides, ConfigManager, ENV_PREFIX};
pub use reader_config::ReaderConfig;
pub use validation::{ConfigSection, Validator};

use serde::{Deserialize, Serialize};

/// Settings file format version
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub app: AppConfig,
    pub reader: ReaderConfig,
    pub catalog: CatalogConfig,
}

impl Config {
    /// Validates every section, collecting all failures
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        for result in [
            self.app.validate(),
            self.reader.validate(),
            self.catalog.validate(),
        ] {
            if let Err(mut section) = result {
                errors.append(&mut section);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Replaces each section with the one from `other`
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.reader.merge(other.reader);
        self.catalog.merge(other.catalog);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            reader: ReaderConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}
