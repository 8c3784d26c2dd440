//! Adapter between page `data-*` attributes and cart operations.
//!
//! Product buttons carry their data as strings. This module is the only
//! place those strings are interpreted; the cart itself only sees parsed
//! [`ProductCandidate`]s and [`ProductId`]s.

use cart_core::cart::ProductCandidate;
use cart_core::price::parse_price;
use cart_core::{CartConfig, CartError, ProductId};
use cart_observability::CartLogger;

/// Dataset key of the product ID (`data-product-id`).
pub const PRODUCT_ID: &str = "productId";
/// Dataset key of the product name (`data-product-name`).
pub const PRODUCT_NAME: &str = "productName";
/// Dataset key of the unit price (`data-product-price`).
pub const PRODUCT_PRICE: &str = "productPrice";
/// Dataset key of the image URL (`data-product-image`).
pub const PRODUCT_IMAGE: &str = "productImage";
/// Dataset key of the action list (`data-action`).
pub const ACTION: &str = "action";
/// Dataset key of the page-level widget configuration (`data-cart-config`).
pub const CART_CONFIG: &str = "cartConfig";

/// Action name that adds the element's product.
pub const ADD_ACTION: &str = "cart#addItem";
/// Action name that removes the element's product.
pub const REMOVE_ACTION: &str = "cart#removeItem";

/// Raw product attributes as read from an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl ProductData {
    /// Read product attributes through a dataset lookup.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            id: lookup(PRODUCT_ID),
            name: lookup(PRODUCT_NAME),
            price: lookup(PRODUCT_PRICE),
            image: lookup(PRODUCT_IMAGE),
        }
    }

    /// Read product attributes from an element's dataset.
    #[cfg(feature = "csr")]
    pub fn from_element(element: &web_sys::HtmlElement) -> Self {
        let dataset = element.dataset();
        Self::from_attributes(|key| dataset.get(key))
    }

    /// Parse into a cart candidate.
    ///
    /// The ID is required. A missing name or image becomes an empty string;
    /// a missing or non-numeric price becomes NaN and is carried through.
    pub fn into_candidate(self) -> Result<ProductCandidate, CartError> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CartError::MissingAttribute("data-product-id".to_string()))?;
        let price = self.price.as_deref().map_or(f64::NAN, parse_price);

        Ok(ProductCandidate::new(
            id,
            self.name.unwrap_or_default(),
            price,
            self.image.unwrap_or_default(),
        ))
    }
}

/// A cart action declared on an element through `data-action`.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add the element's product.
    Add(ProductData),
    /// Remove the product with this ID.
    Remove(ProductId),
}

impl CartAction {
    /// Resolve the action an element declares, if any.
    ///
    /// `data-action` may list several space-separated actions; the first
    /// cart action wins. A remove without a product ID resolves to nothing.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let actions = lookup(ACTION)?;
        let action = actions
            .split_whitespace()
            .find(|a| *a == ADD_ACTION || *a == REMOVE_ACTION)?;

        if action == ADD_ACTION {
            Some(CartAction::Add(ProductData::from_attributes(lookup)))
        } else {
            lookup(PRODUCT_ID)
                .filter(|id| !id.is_empty())
                .map(|id| CartAction::Remove(ProductId::new(id)))
        }
    }

    /// Resolve the action of the closest element around a click target.
    #[cfg(feature = "csr")]
    pub fn from_event(event: &web_sys::Event) -> Option<Self> {
        use wasm_bindgen::JsCast;

        let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
        let element = target
            .closest("[data-action]")
            .ok()??
            .dyn_into::<web_sys::HtmlElement>()
            .ok()?;
        let dataset = element.dataset();
        Self::from_attributes(|key| dataset.get(key))
    }
}

/// Parse the page-level configuration, falling back to defaults.
///
/// An invalid configuration is logged and replaced by the default one so
/// the widget still renders.
pub fn config_from_attribute(raw: Option<&str>, logger: &CartLogger) -> CartConfig {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return CartConfig::default();
    };
    CartConfig::from_json(raw).unwrap_or_else(|e| {
        logger
            .warn_builder("invalid cart config, using defaults")
            .field("error", e.to_string())
            .emit();
        CartConfig::default()
    })
}

/// Read the configuration from `<body data-cart-config>`.
#[cfg(feature = "csr")]
pub fn page_config() -> CartConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .and_then(|b| b.dataset().get(CART_CONFIG));
    let logger = CartConfig::default().logger("cart-widget");
    config_from_attribute(raw.as_deref(), &logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_observability::{LogLevel, LogRecorder};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_full_product_data() {
        let data = ProductData::from_attributes(lookup(&[
            ("productId", "tee-01"),
            ("productName", "Oversized Tee"),
            ("productPrice", "89.90"),
            ("productImage", "/img/tee.jpg"),
        ]));
        let candidate = data.into_candidate().unwrap();

        assert_eq!(candidate.id, ProductId::new("tee-01"));
        assert_eq!(candidate.name, "Oversized Tee");
        assert_eq!(candidate.price, 89.90);
        assert_eq!(candidate.image, "/img/tee.jpg");
    }

    #[test]
    fn test_non_numeric_price_becomes_nan() {
        let data = ProductData::from_attributes(lookup(&[
            ("productId", "tee-01"),
            ("productPrice", "R$ 89,90"),
        ]));
        let candidate = data.into_candidate().unwrap();
        assert!(candidate.price.is_nan());
        assert_eq!(candidate.name, "");
        assert_eq!(candidate.image, "");
    }

    #[test]
    fn test_missing_price_becomes_nan() {
        let candidate = ProductData::from_attributes(lookup(&[("productId", "x")]))
            .into_candidate()
            .unwrap();
        assert!(!candidate.has_valid_price());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let data = ProductData::from_attributes(lookup(&[("productPrice", "10")]));
        assert!(matches!(
            data.into_candidate(),
            Err(CartError::MissingAttribute(_))
        ));

        let blank = ProductData::from_attributes(lookup(&[("productId", "")]));
        assert!(blank.into_candidate().is_err());
    }

    #[test]
    fn test_add_action() {
        let action = CartAction::from_attributes(lookup(&[
            ("action", "click->analytics#track cart#addItem"),
            ("productId", "cap"),
            ("productPrice", "59"),
        ]));
        match action {
            Some(CartAction::Add(data)) => assert_eq!(data.id.as_deref(), Some("cap")),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_remove_action() {
        let action = CartAction::from_attributes(lookup(&[
            ("action", "cart#removeItem"),
            ("productId", "cap"),
        ]));
        assert_eq!(action, Some(CartAction::Remove(ProductId::new("cap"))));

        let without_id = CartAction::from_attributes(lookup(&[("action", "cart#removeItem")]));
        assert_eq!(without_id, None);
    }

    #[test]
    fn test_unrelated_action_is_ignored() {
        assert_eq!(
            CartAction::from_attributes(lookup(&[("action", "menu#toggle")])),
            None
        );
        assert_eq!(CartAction::from_attributes(lookup(&[])), None);
    }

    #[test]
    fn test_config_from_attribute() {
        let recorder = LogRecorder::new();
        let logger = CartLogger::new("cart-widget")
            .with_min_level(LogLevel::Debug)
            .with_recorder(recorder.clone());

        assert_eq!(config_from_attribute(None, &logger), CartConfig::default());
        assert_eq!(config_from_attribute(Some("  "), &logger), CartConfig::default());

        let config = config_from_attribute(Some(r#"{"storage_key":"drop"}"#), &logger);
        assert_eq!(config.storage_key, "drop");
        assert!(recorder.is_empty());

        let fallback = config_from_attribute(Some("{broken"), &logger);
        assert_eq!(fallback, CartConfig::default());
        assert!(recorder.contains("invalid cart config, using defaults"));
    }
}
