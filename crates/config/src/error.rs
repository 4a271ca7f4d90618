//! Error types for loading and saving settings

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read settings file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write settings file {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Settings file {path} is not valid TOML: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// One or more fields are out of range; the message lists all of them
    #[error("Invalid settings: {0}")]
    ValidationError(String),

    /// A settings file from an older release could not be upgraded
    #[error("Cannot migrate settings from version {from}: {reason}")]
    MigrationError { from: u32, reason: String },

    /// A `YAMIKO_*` variable held a value of the wrong shape
    #[error("Environment variable {var}={value} ignored: {reason}")]
    EnvOverride {
        var: String,
        value: String,
        reason: String,
    },

    #[error("Cannot create settings directory {path}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot locate settings directory: {reason}")]
    PathResolutionError { reason: String },

    #[error("Cannot back up settings file: {source}")]
    BackupError { source: std::io::Error },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path such as `catalog.items_per_page`
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Attaches the offending value for display
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl fmt::Display,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }

    /// Joins a batch of errors into one line for logs and `ConfigError`
    pub fn join(errors: &[ValidationError]) -> String {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {} (got {})", self.field, self.message, value),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::with_value("catalog.items_per_page", "must be between 1 and 200", 0);
        assert_eq!(
            err.to_string(),
            "catalog.items_per_page: must be between 1 and 200 (got 0)"
        );

        let err = ValidationError::new("app.data_dir", "must not be empty");
        assert_eq!(err.to_string(), "app.data_dir: must not be empty");
    }

    #[test]
    fn test_join() {
        let errors = vec![
            ValidationError::new("a", "bad"),
            ValidationError::new("b", "worse"),
        ];
        assert_eq!(ValidationError::join(&errors), "a: bad; b: worse");
        assert_eq!(ValidationError::join(&[]), "");
    }

    #[test]
    fn test_env_override_message() {
        let err = ConfigError::EnvOverride {
            var: "YAMIKO_CATALOG_ITEMS_PER_PAGE".into(),
            value: "lots".into(),
            reason: "not a number".into(),
        };
        assert!(err.to_string().contains("YAMIKO_CATALOG_ITEMS_PER_PAGE=lots"));
    }
}
