//! Client-side shopping cart widget.
//!
//! Renders the cart's count badge, item list, total and empty message with
//! Leptos, persists to browser local storage, and picks up "add to cart"
//! clicks from server-rendered product buttons:
//!
//! ```html
//! <body data-cart-config='{"storage_key":"jm-streetwear-cart"}'>
//!   <button data-action="cart#addItem"
//!           data-product-id="tee-01"
//!           data-product-name="Oversized Tee"
//!           data-product-price="89.90"
//!           data-product-image="/img/tee.jpg">Add</button>
//! </body>
//! ```

mod app;
pub mod dataset;

pub use app::*;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn mount() {
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    let config = dataset::page_config();
    leptos::mount::mount_to_body(move || view! { <App config=config/> });
}
