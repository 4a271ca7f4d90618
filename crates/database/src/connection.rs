//! Key-value storage contract and backend selection

use crate::file_store::FileStore;
use crate::memory::MemoryStore;
use std::path::PathBuf;
use yamiko_core::AppError;

/// Default storage quota, matching the browser local-storage budget (5 MiB)
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// A fallible string-to-string store
///
/// Writes to different keys are independent: a failed write leaves every
/// other key as it was and nothing is rolled back.
pub trait KeyValueStore {
    /// Reads the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;

    /// Removes `key`; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), AppError>;

    /// Lists every stored key
    fn keys(&self) -> Result<Vec<String>, AppError>;

    /// Returns the write quota in bytes, if the backend enforces one
    fn quota_bytes(&self) -> Option<u64> {
        None
    }
}

/// Bytes a value occupies against the quota (UTF-16 code units, two bytes each)
pub fn value_size(value: &str) -> u64 {
    value.encode_utf16().count() as u64 * 2
}

/// Total bytes used by every value in the store
pub fn used_bytes<S: KeyValueStore + ?Sized>(store: &S) -> Result<u64, AppError> {
    let mut total = 0;
    for key in store.keys()? {
        if let Some(value) = store.get(&key)? {
            total += value_size(&value);
        }
    }
    Ok(total)
}

/// Rejects a write that would push usage past `quota`
pub(crate) fn check_quota(
    key: &str,
    quota: Option<u64>,
    used: u64,
    replaced: u64,
    incoming: u64,
) -> Result<(), AppError> {
    let Some(quota) = quota else {
        return Ok(());
    };

    let available = quota.saturating_sub(used.saturating_sub(replaced));
    if incoming > available {
        return Err(AppError::StorageQuotaExceeded {
            key: key.to_string(),
            needed_bytes: incoming,
            available_bytes: available,
        });
    }
    Ok(())
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per key
    pub path: PathBuf,
    /// Maximum bytes of stored values, `None` for unlimited
    pub quota_bytes: Option<u64>,
    /// Create the directory if it doesn't exist
    pub create_if_missing: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("yamiko-data"),
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
            create_if_missing: true,
        }
    }
}

impl StorageConfig {
    /// Creates a new configuration with a custom path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Sets the storage quota
    pub fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// Sets whether to create the directory if missing
    pub fn with_create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }
}

/// Opens the persistent file-backed store
pub fn open(config: StorageConfig) -> Result<FileStore, AppError> {
    FileStore::open(config)
}

/// Creates an empty in-memory store for tests and previews
pub fn open_in_memory() -> MemoryStore {
    MemoryStore::new()
}
