//! Typed JSON access on top of the raw key-value contract

use crate::connection::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use yamiko_core::AppError;

/// Reads and decodes the JSON value under `key`
///
/// A missing key is `Ok(None)`; undecodable JSON is `StorageCorrupted`.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| AppError::StorageCorrupted {
            key: key.to_string(),
            details: e.to_string(),
        })
}

/// Reads the JSON value under `key`, falling back to `fallback` on any failure
///
/// Failures other than a missing key are logged at `warn`.
pub fn read_or<T, S, F>(store: &S, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
    F: FnOnce() -> T,
{
    match read_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => fallback(),
        Err(e) => {
            log::warn!("Failed to read '{}': {}", key, e);
            fallback()
        }
    }
}

/// Reads a JSON array, degrading to an empty list
pub fn read_list<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    read_or(store, key, Vec::new)
}

/// Reads a JSON array that is about to be rewritten
///
/// Unlike [`read_list`], an undecodable value is `None`, so the caller
/// never replaces records it could not read.
pub fn read_list_for_update<T, S>(store: &S, key: &str) -> Option<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match read_json(store, key) {
        Ok(Some(list)) => Some(list),
        Ok(None) => Some(Vec::new()),
        Err(e) => {
            log::warn!("Refusing to rewrite '{}': {}", key, e);
            None
        }
    }
}

/// Encodes `value` as JSON and stores it under `key`
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), AppError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(value)
        .map_err(|e| AppError::serialization(format!("Failed to encode '{}'", key), e))?;
    store.set(key, &encoded)
}

/// Like [`write_json`], but reports failure as `false` after logging it
pub fn try_write_json<T, S>(store: &mut S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    match write_json(store, key, value) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to write '{}': {}", key, e);
            false
        }
    }
}
