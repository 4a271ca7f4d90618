//! In-memory key-value backend

use crate::connection::{check_quota, value_size, KeyValueStore};
use std::collections::BTreeMap;
use yamiko_core::AppError;

/// Volatile store backed by an ordered map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<u64>,
}

impl MemoryStore {
    /// Creates an empty store with no quota
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes past `quota_bytes`
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns the number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used(&self) -> u64 {
        self.entries.values().map(|v| value_size(v)).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let replaced = self.entries.get(key).map(|v| value_size(v)).unwrap_or(0);
        check_quota(key, self.quota_bytes, self.used(), replaced, value_size(value))?;

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn quota_bytes(&self) -> Option<u64> {
        self.quota_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut store = MemoryStore::new();
        store.set("mangas", "[]").unwrap();

        assert_eq!(store.get("mangas").unwrap(), Some("[]".to_string()));
        assert_eq!(store.get("chapters").unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.remove("a").unwrap();
        store.remove("missing").unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let mut store = MemoryStore::with_quota(10);
        store.set("a", "abcd").unwrap(); // 8 bytes

        let err = store.set("b", "xy").unwrap_err();
        assert!(matches!(err, AppError::StorageQuotaExceeded { .. }));
        // Failed write leaves nothing behind
        assert_eq!(store.get("b").unwrap(), None);
        assert_eq!(store.get("a").unwrap(), Some("abcd".to_string()));
    }

    #[test]
    fn test_quota_allows_replacing_value() {
        let mut store = MemoryStore::with_quota(10);
        store.set("a", "abcd").unwrap();
        store.set("a", "wxyz").unwrap();

        assert_eq!(store.get("a").unwrap(), Some("wxyz".to_string()));
    }

    #[test]
    fn test_keys_are_sorted() {
        let mut store = MemoryStore::new();
        store.set("b", "1").unwrap();
        store.set("a", "2").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
