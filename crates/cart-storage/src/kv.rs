//! Key-Value store abstraction with automatic serialization.

use std::rc::Rc;

use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};

/// A string-keyed, string-valued persistent store.
///
/// Shaped after browser local storage: single-threaded, synchronous, and
/// unsynchronized between independent holders of the same key
/// (last writer wins).
pub trait KeyValueStore {
    /// Get the raw value at `key`, or `None` if it is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set the raw value at `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value at `key`. Deleting an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

/// Type-safe JSON layer over a [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. A value that is present but
    /// does not parse as `T` is a [`StorageError::Serialize`].
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<LineItem>> = cache.get("jm-streetwear-cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get(key)? {
            Some(raw) => {
                let value: T = serde_json::from_str(&raw)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// Serialization happens before the store is touched, so a value that
    /// fails to serialize leaves the previous entry intact.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Get the raw string stored at `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store.get(key)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.store.exists(key)
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume and return the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}
