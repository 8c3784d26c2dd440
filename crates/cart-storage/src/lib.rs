//! Key-value persistence for the shopping cart widget.
//!
//! The cart treats its store as the system of record: every mutation is
//! written through, and the in-memory cart is only a reloadable cache.
//! Stores are string-keyed and string-valued, matching browser local
//! storage; `Cache` layers JSON (de)serialization on top.
//!
//! # Example
//!
//! ```rust
//! use cart_storage::{Cache, KeyValueStore, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Entry {
//!     id: String,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart", &vec![Entry { id: "tee".into(), quantity: 2 }]).unwrap();
//!
//! let entries: Option<Vec<Entry>> = cache.get("cart").unwrap();
//! assert_eq!(entries.unwrap()[0].quantity, 2);
//! assert!(cache.store().exists("cart").unwrap());
//! ```

mod browser;
mod error;
mod kv;
mod memory;

pub use browser::BrowserStorage;
pub use error::StorageError;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{BrowserStorage, Cache, KeyValueStore, MemoryStore, StorageError};
}
