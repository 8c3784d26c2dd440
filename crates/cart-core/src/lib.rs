//! Shopping cart state, totals and render model.
//!
//! This crate provides the logic behind the storefront cart widget:
//!
//! - **Cart**: ordered line items keyed by product ID, quantities, totals
//! - **Price**: lenient parsing of page-supplied prices and display
//! - **View**: the render model for badge, item list, total and empty message
//! - **Store**: `CartStore`, which keeps a cart in step with a key-value
//!   store and notifies render listeners
//!
//! # Example
//!
//! ```rust
//! use cart_core::prelude::*;
//! use cart_storage::MemoryStore;
//!
//! let mut store = CartStore::new(CartConfig::default(), MemoryStore::new());
//! store.add(ProductCandidate::new("A", "Tee", 10.0, "/a.jpg"));
//! store.add(ProductCandidate::new("B", "Cap", 5.0, "/b.jpg"));
//! store.add(ProductCandidate::new("A", "Tee", 10.0, "/a.jpg"));
//!
//! let ids: Vec<&str> = store.cart().iter().map(|i| i.id.as_str()).collect();
//! assert_eq!(ids, ["A", "B"]);
//! assert_eq!(store.totals().total_price, 25.0);
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod price;
pub mod store;
pub mod view;

pub mod cart;

pub use config::CartConfig;
pub use error::CartError;
pub use ids::ProductId;
pub use store::CartStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CartConfig;
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::price::{format_price, parse_price};
    pub use crate::store::CartStore;

    // Cart
    pub use crate::cart::{
        AddOutcome, Cart, CartTotals, LineItem, ProductCandidate, MAX_QUANTITY_PER_ITEM,
    };

    // View
    pub use crate::view::{BadgeView, CartRowView, CartView};
}
