//! In-memory key-value store.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::{KeyValueStore, StorageError};

/// A `HashMap`-backed store for tests and non-browser hosts.
///
/// An optional byte quota mimics the capacity limit of browser storage:
/// a write that would push the total size of keys and values past the quota
/// fails with [`StorageError::QuotaExceeded`] and leaves the store unchanged.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that holds at most `bytes` of keys and values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            quota_bytes: Some(bytes),
        }
    }

    /// Create a store pre-populated with one entry.
    pub fn seeded(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }

    /// Total bytes of keys and values currently held.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            let current = self.entries.borrow().get(key).map_or(0, |v| key.len() + v.len());
            let projected = self.used_bytes() - current + key.len() + value.len();
            if projected > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    bytes: value.len(),
                });
            }
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);

        store.delete("cart").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let store = MemoryStore::seeded("cart", "[]");
        store.set("cart", "[1]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.used_bytes(), "cart".len() + "[1]".len());
    }

    #[test]
    fn test_quota_rejects_write_and_keeps_previous_value() {
        let store = MemoryStore::with_quota(10);
        store.set("cart", "[]").unwrap();

        let err = store.set("cart", "[1,2,3,4,5]").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { ref key, bytes: 11 } if key == "cart"));
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_quota_counts_replacement_not_sum() {
        let store = MemoryStore::with_quota(8);
        store.set("k", "1234567").unwrap();
        store.set("k", "7654321").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("7654321"));
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::seeded("a", "1");
        store.set("b", "2").unwrap();
        store.clear();
        assert!(store.is_empty());
    }
}
