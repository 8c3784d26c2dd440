//! Cart widget components.

use cart_core::cart::ProductCandidate;
use cart_core::view::{CartRowView, CartView};
use cart_core::{CartConfig, CartStore, ProductId};
use cart_storage::{BrowserStorage, KeyValueStore, MemoryStore};
use leptos::prelude::*;

use crate::dataset::{CartAction, ProductData};

/// Store type used by the widget: local storage in the browser, memory
/// anywhere else.
pub type WidgetStore = CartStore<Box<dyn KeyValueStore>>;

// ============================================================================
// Context
// ============================================================================

/// Handle to the page's cart, shared through Leptos context.
#[derive(Clone, Copy)]
pub struct CartContext {
    store: StoredValue<WidgetStore, LocalStorage>,
    state: RwSignal<CartView>,
}

impl CartContext {
    /// Attach to storage, load the cart and wire rendering to a signal.
    pub fn new(config: CartConfig) -> Self {
        let storage = open_storage(&config);
        let state = RwSignal::new(CartView::default());
        let mut store = CartStore::new(config, storage);
        store.subscribe(move |view| state.set(view.clone()));

        Self {
            store: StoredValue::new_local(store),
            state,
        }
    }

    /// Current render model.
    pub fn state(&self) -> RwSignal<CartView> {
        self.state
    }

    /// Add a parsed product.
    pub fn add(&self, candidate: ProductCandidate) {
        self.store.update_value(|store| {
            store.add(candidate);
        });
    }

    /// Parse raw product attributes and add the product.
    ///
    /// Attributes that cannot form a product are logged and dropped.
    pub fn add_data(&self, data: ProductData) {
        match data.into_candidate() {
            Ok(candidate) => self.add(candidate),
            Err(e) => self.store.with_value(|store| {
                store
                    .config()
                    .logger("cart-widget")
                    .warn_builder("ignoring add without product")
                    .field("error", e.to_string())
                    .emit();
            }),
        }
    }

    /// Remove a product.
    pub fn remove(&self, id: &ProductId) {
        self.store.update_value(|store| {
            store.remove(id);
        });
    }

    /// Run a declared page action.
    pub fn dispatch(&self, action: CartAction) {
        match action {
            CartAction::Add(data) => self.add_data(data),
            CartAction::Remove(id) => self.remove(&id),
        }
    }
}

fn open_storage(config: &CartConfig) -> Box<dyn KeyValueStore> {
    match BrowserStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            config
                .logger("cart-widget")
                .warn_builder("local storage unavailable, cart will not persist")
                .field("error", e.to_string())
                .emit();
            Box::new(MemoryStore::new())
        }
    }
}

/// Get the cart provided by an enclosing [`CartProvider`].
pub fn use_cart() -> CartContext {
    expect_context::<CartContext>()
}

// ============================================================================
// App Component
// ============================================================================

/// The full widget: badge, item list, total and empty message.
#[component]
pub fn App(config: CartConfig) -> impl IntoView {
    view! {
        <CartProvider config=config>
            <div class="cart relative">
                <CartBadge/>
                <div class="cart-dropdown">
                    <CartItems/>
                    <CartTotal/>
                    <CartEmptyMessage/>
                </div>
            </div>
        </CartProvider>
    }
}

/// Provides a [`CartContext`] to its children and listens for declared
/// `data-action` clicks anywhere on the page.
#[component]
pub fn CartProvider(config: CartConfig, children: Children) -> impl IntoView {
    let cart = CartContext::new(config);
    provide_context(cart);

    #[cfg(feature = "csr")]
    {
        let _listener = window_event_listener(leptos::ev::click, move |ev| {
            if let Some(action) = CartAction::from_event(&ev) {
                cart.dispatch(action);
            }
        });
    }

    children()
}

// ============================================================================
// Cart Regions
// ============================================================================

/// Item count badge; hidden while the cart is empty.
#[component]
pub fn CartBadge() -> impl IntoView {
    let state = use_cart().state();

    view! {
        <span
            class="cart-count"
            class:hidden=move || state.with(|v| !v.badge.visible)
        >
            {move || state.with(|v| v.badge.text.clone())}
        </span>
    }
}

/// One row per line item, in cart order; hidden while the cart is empty.
#[component]
pub fn CartItems() -> impl IntoView {
    let state = use_cart().state();

    view! {
        <div
            class="cart-items"
            class:hidden=move || state.with(|v| !v.list_visible)
        >
            <For
                each=move || state.with(|v| v.rows.clone())
                key=|row| (row.id.clone(), row.quantity)
                children=move |row| view! { <CartRow row=row/> }
            />
        </div>
    }
}

#[component]
fn CartRow(row: CartRowView) -> impl IntoView {
    let cart = use_cart();
    let id_attr = row.id.to_string();
    let id = row.id;

    view! {
        <div class="cart-item flex justify-between items-center py-2 border-b">
            <img src=row.image alt=row.name.clone() class="w-12 h-12 object-cover"/>
            <div class="flex-1 px-3">
                <h4 class="font-medium">{row.name}</h4>
                <p>{row.summary}</p>
            </div>
            <button
                class="text-red-500 hover:text-red-700"
                data-product-id=id_attr
                on:click=move |_| cart.remove(&id)
            >
                "✕"
            </button>
        </div>
    }
}

/// Total price text.
#[component]
pub fn CartTotal() -> impl IntoView {
    let state = use_cart().state();

    view! {
        <p class="cart-total font-bold">
            {move || state.with(|v| v.total_text.clone())}
        </p>
    }
}

/// Empty-cart message; shown exactly when the item list is hidden.
#[component]
pub fn CartEmptyMessage(
    #[prop(into, default = "Carrinho vazio".to_string())] text: String,
) -> impl IntoView {
    let state = use_cart().state();

    view! {
        <p
            class="cart-empty"
            class:hidden=move || state.with(|v| !v.empty_message_visible)
        >
            {text}
        </p>
    }
}

/// Button that adds a product described by raw page attributes.
#[component]
pub fn AddToCartButton(
    product: ProductData,
    #[prop(into, default = "Adicionar ao carrinho".to_string())] label: String,
) -> impl IntoView {
    let cart = use_cart();

    view! {
        <button
            type="button"
            class="btn"
            on:click=move |_| cart.add_data(product.clone())
        >
            {label}
        </button>
    }
}
