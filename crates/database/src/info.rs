//! Storage usage reporting

use crate::connection::{used_bytes, KeyValueStore, DEFAULT_QUOTA_BYTES};
use std::fmt;
use yamiko_core::AppError;

/// Snapshot of storage usage against the quota
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageInfo {
    pub used_bytes: u64,
    pub limit_bytes: u64,
    pub available_bytes: u64,
    pub percent_used: f64,
}

impl StorageInfo {
    pub fn new(used_bytes: u64, limit_bytes: u64) -> Self {
        let percent_used = if limit_bytes == 0 {
            100.0
        } else {
            used_bytes as f64 / limit_bytes as f64 * 100.0
        };

        Self {
            used_bytes,
            limit_bytes,
            available_bytes: limit_bytes.saturating_sub(used_bytes),
            percent_used,
        }
    }

    pub fn is_full(&self) -> bool {
        self.available_bytes == 0
    }
}

impl fmt::Display for StorageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MIB: f64 = 1024.0 * 1024.0;
        write!(
            f,
            "{:.2} MB / {:.2} MB ({:.1}%)",
            self.used_bytes as f64 / MIB,
            self.limit_bytes as f64 / MIB,
            self.percent_used
        )
    }
}

/// Measures the store; backends without a quota report against the default
pub fn storage_info<S: KeyValueStore + ?Sized>(store: &S) -> Result<StorageInfo, AppError> {
    let used = used_bytes(store)?;
    let limit = store.quota_bytes().unwrap_or(DEFAULT_QUOTA_BYTES);
    Ok(StorageInfo::new(used, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::with_quota(1000);
        let info = storage_info(&store).unwrap();

        assert_eq!(info.used_bytes, 0);
        assert_eq!(info.available_bytes, 1000);
        assert_eq!(info.percent_used, 0.0);
        assert!(!info.is_full());
    }

    #[test]
    fn test_usage() {
        let mut store = MemoryStore::with_quota(100);
        store.set("a", "0123456789").unwrap();
        store.set("b", "0123456789").unwrap();

        let info = storage_info(&store).unwrap();
        assert_eq!(info.used_bytes, 40);
        assert_eq!(info.available_bytes, 60);
        assert!((info.percent_used - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_limit_without_quota() {
        let store = MemoryStore::new();
        assert_eq!(storage_info(&store).unwrap().limit_bytes, DEFAULT_QUOTA_BYTES);
    }

    #[test]
    fn test_display() {
        let info = StorageInfo::new(1024 * 1024, 5 * 1024 * 1024);
        assert_eq!(info.to_string(), "1.00 MB / 5.00 MB (20.0%)");
    }

    #[test]
    fn test_zero_limit() {
        let info = StorageInfo::new(0, 0);
        assert!(info.is_full());
        assert_eq!(info.percent_used, 100.0);
    }
}
