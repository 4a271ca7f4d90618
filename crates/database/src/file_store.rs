//! File-backed key-value store
//!
//! Each key lives in its own `<key>.json` file inside the data directory.
//! Writes go through a temporary file in the same directory and an atomic
//! rename, so a crash never leaves a half-written value behind.

use crate::connection::{check_quota, value_size, KeyValueStore, StorageConfig};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use yamiko_core::AppError;

const EXTENSION: &str = "json";

/// Persistent store rooted at a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileStore {
    /// Opens a store, creating the directory if the config allows it
    pub fn open(config: StorageConfig) -> Result<Self, AppError> {
        if !config.path.exists() {
            if !config.create_if_missing {
                return Err(AppError::FileNotFound { path: config.path });
            }
            fs::create_dir_all(&config.path)
                .map_err(|e| AppError::io("create directory", &config.path, e))?;
            log::info!("Created data directory: {}", config.path.display());
        }

        if !config.path.is_dir() {
            return Err(AppError::InvalidArgument {
                argument: "path".to_string(),
                reason: format!("{} is not a directory", config.path.display()),
            });
        }

        Ok(Self {
            root: config.path,
            quota_bytes: config.quota_bytes,
        })
    }

    /// Returns the data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, EXTENSION)))
    }

    fn used_excluding(&self, key: &str) -> Result<(u64, u64), AppError> {
        let mut used = 0;
        let mut replaced = 0;
        for existing in self.keys()? {
            let size = self.get(&existing)?.map(|v| value_size(&v)).unwrap_or(0);
            if existing == key {
                replaced = size;
            }
            used += size;
        }
        Ok((used, replaced))
    }
}

/// Keys become file names, so only a conservative character set is allowed
fn validate_key(key: &str) -> Result<(), AppError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidArgument {
            argument: "key".to_string(),
            reason: format!("'{}' is not a valid storage key", key),
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(
                format!("Failed to read {}", path.display()),
                e,
            )),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;

        if self.quota_bytes.is_some() {
            let (used, replaced) = self.used_excluding(key)?;
            check_quota(key, self.quota_bytes, used, replaced, value_size(value))?;
        }

        let mut temp_file = NamedTempFile::new_in(&self.root)
            .map_err(|e| AppError::storage("Failed to create temporary file", e))?;
        temp_file
            .write_all(value.as_bytes())
            .map_err(|e| AppError::storage("Failed to write temporary file", e))?;
        temp_file
            .flush()
            .map_err(|e| AppError::storage("Failed to flush temporary file", e))?;
        temp_file
            .persist(&path)
            .map_err(|e| AppError::storage(format!("Failed to persist {}", path.display()), e.error))?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(
                format!("Failed to remove {}", path.display()),
                e,
            )),
        }
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| AppError::storage("Failed to list data directory", e))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AppError::storage("Failed to read directory entry", e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn quota_bytes(&self) -> Option<u64> {
        self.quota_bytes
    }
}
