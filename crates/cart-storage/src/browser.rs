//! Browser local storage backend.

use crate::{KeyValueStore, StorageError};

/// Key-value store backed by `window.localStorage`.
///
/// Only functional on `wasm32`; on other targets [`BrowserStorage::open`]
/// reports the store as unavailable so callers can fall back to
/// [`MemoryStore`](crate::MemoryStore).
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    #[cfg(target_arch = "wasm32")]
    storage: web_sys::Storage,
    #[cfg(not(target_arch = "wasm32"))]
    _phantom: std::marker::PhantomData<()>,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    /// Open the page's local storage.
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_error_text(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error_text(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Store(js_error_text(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|e| {
            let text = js_error_text(&e);
            if text.contains("QuotaExceeded") {
                StorageError::QuotaExceeded {
                    key: key.to_string(),
                    bytes: value.len(),
                }
            } else {
                StorageError::Store(text)
            }
        })
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Store(js_error_text(&e)))
    }
}

// Non-WASM stubs for development/testing
#[cfg(not(target_arch = "wasm32"))]
impl BrowserStorage {
    pub fn open() -> Result<Self, StorageError> {
        Err(StorageError::Unavailable(
            "localStorage requires a browser".to_string(),
        ))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for BrowserStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(
            "localStorage requires a browser".to_string(),
        ))
    }

    fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_outside_browser() {
        let err = BrowserStorage::open().unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
    }
}
