//! Errors for the catalog and reader layers
//!
//! Each [`AppError`] has a severity (recoverable, degraded or fatal) and a
//! suggested [`RecoveryAction`] so callers can react without matching every
//! variant.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// What a host should do about an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    RetryImmediate,
    /// Show an empty or default view and carry on
    UseDefault,
    /// Remove data before writing again
    FreeStorage,
    /// Wipe and re-seed the catalog
    ResetStorage,
    UserIntervention,
}

impl RecoveryAction {
    fn describe(&self) -> &'static str {
        match self {
            Self::RetryImmediate => "retry now",
            Self::UseDefault => "fall back to defaults",
            Self::FreeStorage => "free storage space",
            Self::ResetStorage => "reset storage",
            Self::UserIntervention => "ask the user",
        }
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// How badly an error affects the caller, mildest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Recoverable,
    Degraded,
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Recoverable => "recoverable",
            Self::Degraded => "degraded",
            Self::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// The key-value backend failed
    #[error("Storage error: {message}")]
    StorageError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Storage quota exceeded writing '{key}': needed {needed_bytes} bytes, available {available_bytes} bytes")]
    StorageQuotaExceeded {
        key: String,
        needed_bytes: u64,
        available_bytes: u64,
    },

    /// A stored value could not be decoded
    #[error("Storage corrupted at '{key}': {details}")]
    StorageCorrupted { key: String, details: String },

    /// Lookup by id or slug found nothing
    #[error("Record not found: {entity} with {identifier}")]
    RecordNotFound { entity: String, identifier: String },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Permission denied: {operation} on {path}")]
    PermissionDenied { operation: String, path: PathBuf },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StorageError { .. } | Self::IoError { .. } => ErrorSeverity::Recoverable,

            Self::StorageQuotaExceeded { .. } | Self::PermissionDenied { .. } => {
                ErrorSeverity::Fatal
            }

            // Missing records, corrupt values and bad input all degrade to
            // an empty view
            _ => ErrorSeverity::Degraded,
        }
    }

    pub fn recovery_action(&self) -> RecoveryAction {
        match self {
            Self::StorageError { .. } | Self::IoError { .. } => RecoveryAction::RetryImmediate,

            Self::StorageQuotaExceeded { .. } => RecoveryAction::FreeStorage,

            Self::StorageCorrupted { .. } => RecoveryAction::ResetStorage,

            Self::RecordNotFound { .. }
            | Self::FileNotFound { .. }
            | Self::InvalidArgument { .. } => RecoveryAction::UseDefault,

            _ => RecoveryAction::UserIntervention,
        }
    }

    /// Message for end users, without internal details
    pub fn user_message(&self) -> String {
        match self {
            Self::StorageError { .. } | Self::IoError { .. } => {
                "Local storage is temporarily unavailable. Please try again.".to_string()
            }
            Self::StorageQuotaExceeded { .. } => {
                "Local storage is full. Remove some data and try again.".to_string()
            }
            Self::StorageCorrupted { .. } => {
                "Saved data is damaged and will be reset.".to_string()
            }
            Self::RecordNotFound { entity, .. } => format!("{} not found.", entity),
            Self::SerializationError { .. } => "Cannot save this data.".to_string(),
            Self::FileNotFound { .. } => {
                "The data file was not found. It may have been moved or deleted.".to_string()
            }
            Self::PermissionDenied { .. } => {
                "Permission denied. Please check access to the data directory.".to_string()
            }
            Self::InternalError { .. } => {
                "An unexpected error occurred. Please try again.".to_string()
            }
            Self::InvalidArgument { .. } => "Invalid input provided.".to_string(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.recovery_action(), RecoveryAction::RetryImmediate)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// Wraps a backend failure
    pub fn storage<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::StorageError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn serialization<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// `entity` is a type name such as "Title"; `identifier` is the id or slug looked up
    pub fn not_found(entity: impl Into<String>, identifier: impl fmt::Display) -> Self {
        Self::RecordNotFound {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Classifies an I/O failure on `path`
    pub fn io(operation: &str, path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                operation: operation.to_string(),
                path,
            },
            _ => Self::IoError {
                message: format!("{} {}: {}", operation, path.display(), err),
                source: err,
            },
        }
    }
}

/// Without a path, every I/O failure is reported as `IoError`
impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON encoding failed", err)
    }
}
