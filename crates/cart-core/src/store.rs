//! Cart store: state synchronized with persistence and rendering.

use cart_observability::CartLogger;
use cart_storage::{Cache, KeyValueStore};

use crate::cart::{AddOutcome, Cart, CartTotals, LineItem, ProductCandidate};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::view::CartView;

type Listener = Box<dyn Fn(&CartView)>;

/// Owns a cart and keeps it in step with its store and its view.
///
/// The key-value store is the system of record. Every mutation runs one
/// complete cycle: reload from the store, mutate, persist, then notify the
/// render listeners. Failures along the way are logged and recovered from;
/// no operation panics or surfaces an error to the render path.
///
/// # Example
///
/// ```rust
/// use cart_core::prelude::*;
/// use cart_storage::MemoryStore;
///
/// let mut store = CartStore::new(CartConfig::default(), MemoryStore::new());
/// store.add(ProductCandidate::new("tee", "Oversized Tee", 10.0, "/tee.jpg"));
/// store.add(ProductCandidate::new("tee", "Oversized Tee", 10.0, "/tee.jpg"));
///
/// assert_eq!(store.totals().item_count, 2);
/// assert_eq!(store.view().total_text, "R$ 20.00");
/// ```
pub struct CartStore<S> {
    config: CartConfig,
    cache: Cache<S>,
    cart: Cart,
    logger: CartLogger,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Attach to a store and load the persisted cart.
    pub fn new(config: CartConfig, storage: S) -> Self {
        let logger = config.logger("cart-store");
        Self::with_logger(config, storage, logger)
    }

    /// Like [`CartStore::new`] with an explicit logger.
    pub fn with_logger(config: CartConfig, storage: S, logger: CartLogger) -> Self {
        let mut store = Self {
            config,
            cache: Cache::new(storage),
            cart: Cart::new(),
            logger,
            listeners: Vec::new(),
        };
        store.load();
        store
    }

    /// Reload the cart from the store.
    ///
    /// A missing key yields an empty cart. So does a value that cannot be
    /// read or parsed; that case is logged and otherwise ignored.
    pub fn load(&mut self) -> &Cart {
        self.cart = self.read();
        &self.cart
    }

    fn read(&self) -> Cart {
        let key = &self.config.storage_key;
        match self.cache.get::<Vec<LineItem>>(key) {
            Ok(Some(raw)) => {
                let (cart, adjusted) = Cart::normalize(raw);
                if adjusted > 0 {
                    self.logger
                        .warn_builder("normalized persisted cart")
                        .field_u64("adjusted_rows", adjusted as u64)
                        .emit();
                }
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                self.logger
                    .warn_builder("discarding unreadable cart")
                    .field("error", e.to_string())
                    .emit();
                Cart::new()
            }
        }
    }

    /// Add a product: bump its quantity if present, append it otherwise.
    pub fn add(&mut self, candidate: ProductCandidate) -> &Cart {
        self.load();

        if !candidate.has_valid_price() {
            self.logger
                .warn_builder("price is not a number")
                .field("product_id", candidate.id.as_str())
                .field_f64("price", candidate.price)
                .emit();
        }

        let id = candidate.id.clone();
        match self.cart.add(candidate) {
            Ok(outcome) => {
                let quantity = match outcome {
                    AddOutcome::Inserted => 1,
                    AddOutcome::Incremented { quantity } => quantity,
                };
                self.logger
                    .debug_builder("item added")
                    .field("product_id", id.as_str())
                    .field_u64("quantity", u64::from(quantity))
                    .emit();
                self.persist(&self.cart);
            }
            Err(e) => {
                self.logger
                    .warn_builder("add rejected")
                    .field("product_id", id.as_str())
                    .field("error", e.to_string())
                    .emit();
            }
        }

        self.notify();
        &self.cart
    }

    /// Remove the item with this ID. An unknown ID leaves the cart as is.
    pub fn remove(&mut self, id: &ProductId) -> &Cart {
        self.load();
        let removed = self.cart.remove(id);
        self.logger
            .debug_builder("item removed")
            .field("product_id", id.as_str())
            .field_bool("found", removed)
            .emit();
        self.commit()
    }

    /// Decrease the item's quantity by one, removing it at zero.
    pub fn decrement(&mut self, id: &ProductId) -> &Cart {
        self.load();
        let found = self.cart.decrement(id);
        self.logger
            .debug_builder("item decremented")
            .field("product_id", id.as_str())
            .field_bool("found", found)
            .emit();
        self.commit()
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> &Cart {
        self.cart.clear();
        self.logger.debug("cart cleared");
        self.commit()
    }

    fn commit(&mut self) -> &Cart {
        self.persist(&self.cart);
        self.notify();
        &self.cart
    }

    /// Item count and total price, computed from the current cart.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Write a cart to the store, logging any failure.
    ///
    /// A failed write leaves the previously persisted value in place.
    pub fn persist(&self, cart: &Cart) {
        if let Err(e) = self.try_persist(cart) {
            self.logger
                .error_builder("failed to persist cart")
                .field("error", e.to_string())
                .field_u64("items", cart.len() as u64)
                .emit();
        }
    }

    /// Write a cart to the store.
    pub fn try_persist(&self, cart: &Cart) -> Result<(), CartError> {
        self.cache.set(&self.config.storage_key, cart)?;
        Ok(())
    }

    /// Register a render listener.
    ///
    /// The listener is called at once with the current view, then after
    /// every mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&CartView) + 'static) {
        listener(&self.view());
        self.listeners.push(Box::new(listener));
    }

    /// Re-render every listener with the current view.
    pub fn notify(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let view = self.view();
        for listener in &self.listeners {
            listener(&view);
        }
    }

    /// Render model for the current cart.
    pub fn view(&self) -> CartView {
        CartView::build(&self.cart, &self.config.currency_label)
    }

    /// The in-memory cart as of the last load or mutation.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The active configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// The underlying store.
    pub fn storage(&self) -> &S {
        self.cache.store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_observability::{LogLevel, LogRecorder};
    use cart_storage::{MemoryStore, StorageError};
    use std::cell::RefCell;
    use std::rc::Rc;

    const KEY: &str = "jm-streetwear-cart";

    fn recorded_store(storage: MemoryStore) -> (CartStore<MemoryStore>, LogRecorder) {
        let recorder = LogRecorder::new();
        let config = CartConfig::default().with_log_level(LogLevel::Debug);
        let logger = config.logger("cart-store").with_recorder(recorder.clone());
        (CartStore::with_logger(config, storage, logger), recorder)
    }

    fn tee() -> ProductCandidate {
        ProductCandidate::new("tee", "Tee", 10.0, "/tee.jpg")
    }

    #[test]
    fn test_load_from_empty_storage() {
        let (mut store, recorder) = recorded_store(MemoryStore::new());
        assert!(store.load().is_empty());
        let totals = store.totals();
        assert_eq!(totals.item_count, 0);
        assert_eq!(totals.total_price, 0.0);
        assert!(recorder.at_level(LogLevel::Warn).is_empty());
    }

    #[test]
    fn test_load_corrupt_storage_is_empty_and_logged() {
        let (store, recorder) = recorded_store(MemoryStore::seeded(KEY, "{oops"));
        assert!(store.cart().is_empty());
        assert!(recorder.contains("discarding unreadable cart"));
    }

    #[test]
    fn test_load_normalizes_and_logs() {
        let raw = r#"[{"id":"a","name":"A","price":1,"image":"","quantity":0}]"#;
        let (store, recorder) = recorded_store(MemoryStore::seeded(KEY, raw));
        assert!(store.cart().is_empty());
        assert!(recorder.contains("normalized persisted cart"));
    }

    #[test]
    fn test_add_persists_under_configured_key() {
        let config = CartConfig::new("custom-key");
        let mut store = CartStore::new(config, MemoryStore::new());
        store.add(tee());

        let raw = store.storage().get("custom-key").unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"id":"tee","name":"Tee","price":10.0,"image":"/tee.jpg","quantity":1}]"#
        );
        assert!(store.storage().get(KEY).unwrap().is_none());
    }

    #[test]
    fn test_mutations_reload_from_storage_first() {
        let shared = Rc::new(MemoryStore::new());
        let mut first = CartStore::new(CartConfig::default(), Rc::clone(&shared));
        let mut second = CartStore::new(CartConfig::default(), Rc::clone(&shared));

        first.add(tee());
        second.add(ProductCandidate::new("cap", "Cap", 5.0, ""));

        let ids: Vec<&str> = second.cart().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["tee", "cap"]);
    }

    #[test]
    fn test_storage_write_failure_is_logged_and_keeps_previous_state() {
        let storage = MemoryStore::with_quota(120);
        let (mut store, recorder) = recorded_store(storage);
        store.add(tee());
        let persisted = store.storage().get(KEY).unwrap();
        assert!(persisted.is_some());

        store.add(ProductCandidate::new(
            "long",
            "A product with a rather long display name",
            12.0,
            "/img/long.jpg",
        ));

        assert_eq!(store.storage().get(KEY).unwrap(), persisted);
        assert_eq!(store.cart().len(), 2);
        assert_eq!(recorder.at_level(LogLevel::Error).len(), 1);
        assert!(matches!(
            store.try_persist(store.cart()),
            Err(CartError::Storage(StorageError::QuotaExceeded { .. }))
        ));
    }

    #[test]
    fn test_nan_price_is_logged() {
        let (mut store, recorder) = recorded_store(MemoryStore::new());
        store.add(ProductCandidate::new("tee", "Tee", f64::NAN, ""));

        assert!(recorder.contains("price is not a number"));
        assert!(store.totals().total_price.is_nan());
        assert_eq!(store.view().total_text, "R$ NaN");
    }

    #[test]
    fn test_subscribe_renders_immediately_and_after_mutations() {
        let (mut store, _) = recorded_store(MemoryStore::new());
        let seen: Rc<RefCell<Vec<(String, bool)>>> = Rc::default();

        let sink = Rc::clone(&seen);
        store.subscribe(move |view| {
            sink.borrow_mut()
                .push((view.badge.text.clone(), view.empty_message_visible));
        });

        store.add(tee());
        store.add(tee());
        store.remove(&ProductId::new("tee"));

        assert_eq!(
            *seen.borrow(),
            vec![
                ("0".to_string(), true),
                ("1".to_string(), false),
                ("2".to_string(), false),
                ("0".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let (mut store, _) = recorded_store(MemoryStore::new());
        store.add(tee());
        let before = store.cart().clone();

        store.remove(&ProductId::new("nope"));
        assert_eq!(store.cart(), &before);
    }

    #[test]
    fn test_decrement_and_clear() {
        let (mut store, _) = recorded_store(MemoryStore::new());
        store.add(tee());
        store.add(tee());

        store.decrement(&ProductId::new("tee"));
        assert_eq!(store.totals().item_count, 1);

        store.clear();
        assert!(store.cart().is_empty());
        assert_eq!(store.storage().get(KEY).unwrap().as_deref(), Some("[]"));
    }
}
