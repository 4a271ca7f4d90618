//! Entry point for locating, loading and updating settings

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel, ValidationError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use yamiko_core::{ReaderBackground, ReaderFit, ReaderMode};

const CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `YAMIKO_CATALOG_ITEMS_PER_PAGE`
pub const ENV_PREFIX: &str = "YAMIKO_";

pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Uses the platform settings directory
    ///
    /// - Linux: `~/.config/yamiko/`
    /// - macOS: `~/Library/Application Support/yamiko/`
    /// - Windows: `%APPDATA%\yamiko\config\`
    pub fn new() -> ConfigResult<Self> {
        let dir = ProjectDirs::from("", "", "yamiko")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "no home directory for the current user".to_string(),
            })?;
        Ok(Self::with_directory(dir))
    }

    pub fn with_directory(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        Self {
            persistence: ConfigPersistence::new(config_dir.join(CONFIG_FILE)),
            config_dir,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> &Path {
        self.persistence.path()
    }

    /// Resolves `app.data_dir` against the settings directory
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        if config.app.data_dir.is_absolute() {
            config.app.data_dir.clone()
        } else {
            self.config_dir.join(&config.app.data_dir)
        }
    }

    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Like `load`, but a broken file degrades to defaults with a warning
    pub fn load_or_default(&self) -> Config {
        self.load().unwrap_or_else(|e| {
            log::warn!("{}; using default settings", e);
            Config::default()
        })
    }

    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads, applies `f` and saves
    ///
    /// ```rust,no_run
    /// # use yamiko_config::ConfigManager;
    /// # fn main() -> Result<(), yamiko_config::ConfigError> {
    /// let manager = ConfigManager::new()?;
    /// manager.update(|config| config.catalog.items_per_page = 40)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn update<F>(&self, f: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        f(&mut config);
        self.save(&config)
    }

    /// Writes a commented default file unless one exists; returns true if written
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::debug!("Settings already present at {}", self.config_path().display());
            return Ok(false);
        }
        self.persistence.write_default()?;
        Ok(true)
    }

    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Problems with the file on disk, one line each
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        Ok(match self.load()?.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(ToString::to_string).collect(),
        })
    }

    /// Loads the file and layers `YAMIKO_*` process variables on top
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        for err in apply_env_overrides(&mut config, |name| std::env::var(name).ok()) {
            log::warn!("{}", err);
        }
        if let Err(errors) = config.validate() {
            log::warn!(
                "Settings invalid after environment overrides: {}",
                ValidationError::join(&errors)
            );
        }
        Ok(config)
    }
}

/// Applies overrides found through `lookup`
///
/// Unparsable values are skipped and returned so the caller can report them.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Vec<ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut errors = Vec::new();
    let mut env = EnvReader {
        lookup,
        errors: &mut errors,
    };

    if let Some(dir) = env.raw("APP_DATA_DIR") {
        config.app.data_dir = PathBuf::from(dir);
    }
    env.parse::<LogLevel>("APP_LOG_LEVEL", &mut config.app.log_level);
    env.parse::<u64>("APP_STORAGE_QUOTA_BYTES", &mut config.app.storage_quota_bytes);
    env.parse::<bool>("APP_SEED_DEMO_DATA", &mut config.app.seed_demo_data);

    env.parse::<ReaderMode>("READER_DEFAULT_MODE", &mut config.reader.default_mode);
    env.parse::<ReaderFit>("READER_DEFAULT_FIT", &mut config.reader.default_fit);
    env.parse::<ReaderBackground>("READER_DEFAULT_BACKGROUND", &mut config.reader.default_background);
    env.parse::<bool>("READER_SHOW_UI", &mut config.reader.show_ui);

    env.parse::<usize>("CATALOG_ITEMS_PER_PAGE", &mut config.catalog.items_per_page);
    env.parse::<usize>("CATALOG_SEARCH_RESULT_LIMIT", &mut config.catalog.search_result_limit);
    env.parse::<u64>("CATALOG_SEARCH_DEBOUNCE_MS", &mut config.catalog.search_debounce_ms);
    env.parse::<usize>("CATALOG_MIN_SEARCH_LEN", &mut config.catalog.min_search_len);
    env.parse::<usize>("CATALOG_DEFAULT_LISTING_LIMIT", &mut config.catalog.default_listing_limit);
    if let Some(sort) = env.raw("CATALOG_DEFAULT_SORT") {
        config.catalog.default_sort = sort.trim().to_lowercase();
    }

    errors
}

struct EnvReader<'a, F> {
    lookup: F,
    errors: &'a mut Vec<ConfigError>,
}

impl<F> EnvReader<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, suffix: &str) -> Option<String> {
        (self.lookup)(&format!("{}{}", ENV_PREFIX, suffix))
    }

    fn parse<T>(&mut self, suffix: &str, slot: &mut T)
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(value) = self.raw(suffix) else {
            return;
        };
        match value.trim().parse::<T>() {
            Ok(parsed) => {
                log::debug!("{}{} overrides settings file", ENV_PREFIX, suffix);
                *slot = parsed;
            }
            Err(e) => self.errors.push(ConfigError::EnvOverride {
                var: format!("{}{}", ENV_PREFIX, suffix),
                value,
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ConfigManager) {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(dir.path());
        (dir, manager)
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_paths() {
        let (dir, manager) = setup();
        assert_eq!(manager.config_path(), dir.path().join("config.toml"));

        let mut config = Config::default();
        assert_eq!(manager.data_dir(&config), dir.path().join("data"));

        config.app.data_dir = PathBuf::from("/srv/yamiko");
        assert_eq!(manager.data_dir(&config), PathBuf::from("/srv/yamiko"));
    }

    #[test]
    fn test_initialize_once() {
        let (_dir, manager) = setup();
        assert!(manager.initialize().unwrap());
        assert!(!manager.initialize().unwrap());
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn test_update() {
        let (_dir, manager) = setup();
        manager
            .update(|config| config.reader.default_mode = ReaderMode::Single)
            .unwrap();
        assert_eq!(manager.load().unwrap().reader.default_mode, ReaderMode::Single);
    }

    #[test]
    fn test_rejected_update_keeps_file() {
        let (_dir, manager) = setup();
        manager.initialize().unwrap();
        assert!(manager.update(|config| config.catalog.items_per_page = 0).is_err());
        assert_eq!(manager.load().unwrap().catalog.items_per_page, 20);
    }

    #[test]
    fn test_load_or_default_on_garbage() {
        let (_dir, manager) = setup();
        std::fs::write(manager.config_path(), "not = [toml").unwrap();
        assert_eq!(manager.load_or_default(), Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let errors = apply_env_overrides(
            &mut config,
            vars(&[
                ("YAMIKO_APP_LOG_LEVEL", "debug"),
                ("YAMIKO_APP_DATA_DIR", "/tmp/yamiko"),
                ("YAMIKO_READER_DEFAULT_MODE", "Horizontal"),
                ("YAMIKO_CATALOG_ITEMS_PER_PAGE", " 50 "),
                ("YAMIKO_CATALOG_DEFAULT_SORT", "Rating"),
            ]),
        );

        assert!(errors.is_empty());
        assert_eq!(config.app.log_level, LogLevel::Debug);
        assert_eq!(config.app.data_dir, PathBuf::from("/tmp/yamiko"));
        assert_eq!(config.reader.default_mode, ReaderMode::Horizontal);
        assert_eq!(config.catalog.items_per_page, 50);
        assert_eq!(config.catalog.default_sort, "rating");
    }

    #[test]
    fn test_bad_env_values_reported_and_skipped() {
        let mut config = Config::default();
        let errors = apply_env_overrides(
            &mut config,
            vars(&[
                ("YAMIKO_CATALOG_SEARCH_DEBOUNCE_MS", "soon"),
                ("YAMIKO_READER_SHOW_UI", "yes"),
            ]),
        );

        assert_eq!(errors.len(), 2);
        assert_eq!(config.catalog.search_debounce_ms, 300);
        assert!(config.reader.show_ui);
    }
}
