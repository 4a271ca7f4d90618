//! Reading and writing the settings file
//!
//! Writes go through a temporary file in the same directory and an atomic
//! rename, and the previous file is kept as `config.toml.backup`.

use crate::{migration, Config, ConfigError, ConfigResult, ValidationError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn backup_path(&self) -> PathBuf {
        self.config_path.with_extension("toml.backup")
    }

    /// Loads the settings file
    ///
    /// A missing file yields defaults. An empty or unparsable file is an
    /// error. Out-of-range values only produce a warning so the user can fix
    /// them by hand.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "No settings file at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "settings file is empty",
                ),
            });
        }

        let mut table: toml::Table = toml::from_str(&contents).map_err(|e| self.parse_error(e))?;
        let migrated = migration::migrate_to_latest(&mut table)?;

        let config = toml::Value::Table(table)
            .try_into::<Config>()
            .map_err(|e| self.parse_error(e))?;

        if migrated {
            self.save(&config)?;
        }

        if let Err(errors) = config.validate() {
            log::warn!("Settings have invalid values: {}", ValidationError::join(&errors));
        }

        Ok(config)
    }

    /// Validates and writes `config` atomically
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        config
            .validate()
            .map_err(|errors| ConfigError::ValidationError(ValidationError::join(&errors)))?;

        self.write_body(&toml::to_string_pretty(config)?)?;
        log::info!("Settings saved to {}", self.config_path.display());
        Ok(())
    }

    /// Writes the defaults with a short header explaining each table
    pub fn write_default(&self) -> ConfigResult<()> {
        let body = toml::to_string_pretty(&Config::default())?;
        self.write_body(&format!("{}\n{}", DEFAULT_HEADER, body))?;
        log::info!("Wrote default settings to {}", self.config_path.display());
        Ok(())
    }

    fn write_body(&self, body: &str) -> ConfigResult<()> {
        let dir = self
            .config_path
            .parent()
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: format!("{} has no parent directory", self.config_path.display()),
            })?;
        ensure_dir(dir)?;

        if self.config_path.exists() {
            fs::copy(&self.config_path, self.backup_path())
                .map_err(|e| ConfigError::BackupError { source: e })?;
        }

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(body.as_bytes())?;
        file.flush()?;
        file.persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;
        Ok(())
    }

    fn parse_error(&self, source: toml::de::Error) -> ConfigError {
        ConfigError::ParseError {
            path: self.config_path.clone(),
            source,
        }
    }
}

const DEFAULT_HEADER: &str = "\
# Yamiko settings
#
# [app]      data directory, log level, storage quota, demo data
# [reader]   initial reader mode, fit and background
# [catalog]  page size, listing sizes and search tuning
#
# Any YAMIKO_<SECTION>_<FIELD> environment variable overrides the value here.
";

fn ensure_dir(path: &Path) -> ConfigResult<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| ConfigError::DirectoryCreationError {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::debug!("Created settings directory {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ConfigPersistence) {
        let dir = TempDir::new().unwrap();
        let persistence = ConfigPersistence::new(dir.path().join("config.toml"));
        (dir, persistence)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (_dir, persistence) = setup();
        assert_eq!(persistence.load().unwrap(), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, persistence) = setup();
        let mut config = Config::default();
        config.catalog.items_per_page = 48;
        config.app.seed_demo_data = false;

        persistence.save(&config).unwrap();
        let loaded = persistence.load().unwrap();
        assert_eq!(loaded.catalog.items_per_page, 48);
        assert!(!loaded.app.seed_demo_data);
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let (_dir, persistence) = setup();
        fs::write(persistence.path(), "  \n").unwrap();
        assert!(matches!(persistence.load(), Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let (_dir, persistence) = setup();
        fs::write(persistence.path(), "[catalog\nitems_per_page = ").unwrap();
        assert!(matches!(persistence.load(), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_invalid_values_not_saved() {
        let (_dir, persistence) = setup();
        let mut config = Config::default();
        config.catalog.search_result_limit = 0;

        let err = persistence.save(&config).unwrap_err();
        assert!(err.to_string().contains("catalog.search_result_limit"));
        assert!(!persistence.path().exists());
    }

    #[test]
    fn test_invalid_values_still_load() {
        let (_dir, persistence) = setup();
        fs::write(persistence.path(), "version = 1\n[catalog]\nitems_per_page = 0\n").unwrap();
        let config = persistence.load().unwrap();
        assert_eq!(config.catalog.items_per_page, 0);
    }

    #[test]
    fn test_backup_on_overwrite() {
        let (_dir, persistence) = setup();
        persistence.save(&Config::default()).unwrap();
        assert!(!persistence.backup_path().exists());

        let mut config = Config::default();
        config.catalog.min_search_len = 3;
        persistence.save(&config).unwrap();

        let backup = fs::read_to_string(persistence.backup_path()).unwrap();
        assert!(backup.contains("min_search_len = 2"));
    }

    #[test]
    fn test_legacy_file_migrated_and_rewritten() {
        let (_dir, persistence) = setup();
        fs::write(persistence.path(), "[catalog]\npage_size = 12\n").unwrap();

        let config = persistence.load().unwrap();
        assert_eq!(config.catalog.items_per_page, 12);

        let on_disk = fs::read_to_string(persistence.path()).unwrap();
        assert!(on_disk.contains("items_per_page = 12"));
        assert!(!on_disk.contains("page_size"));
    }

    #[test]
    fn test_write_default_has_header_and_parses() {
        let (_dir, persistence) = setup();
        persistence.write_default().unwrap();

        let body = fs::read_to_string(persistence.path()).unwrap();
        assert!(body.starts_with("# Yamiko settings"));
        assert_eq!(persistence.load().unwrap(), Config::default());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let persistence = ConfigPersistence::new(dir.path().join("a/b/config.toml"));
        persistence.save(&Config::default()).unwrap();
        assert!(persistence.path().exists());
    }
}
