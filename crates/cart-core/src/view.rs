//! Render model consumed by the widget's view layer.
//!
//! The view layer owns four independently toggled regions: the count
//! badge, the item list, the total price and the empty-cart message.
//! `CartView` carries exactly what each region shows, so the renderer is a
//! plain projection with no cart logic of its own.

use crate::cart::{Cart, CartTotals, LineItem};
use crate::ids::ProductId;
use crate::price::format_price;
use serde::Serialize;

/// Count badge state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    /// Sum of quantities, as text.
    pub text: String,
    /// Hidden when the cart holds no items.
    pub visible: bool,
}

/// One rendered row of the item list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartRowView {
    /// Product ID, fed back to `remove` by the row's remove button.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Image URL.
    pub image: String,
    /// Quantity.
    pub quantity: u32,
    /// Unit price with currency label.
    pub unit_price_text: String,
    /// "2 x R$ 89.90".
    pub summary: String,
}

impl CartRowView {
    fn from_item(item: &LineItem, label: &str) -> Self {
        let unit_price_text = format_price(label, item.price);
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            summary: format!("{} x {}", item.quantity, unit_price_text),
            unit_price_text,
        }
    }
}

/// Everything the view layer needs to draw the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    /// Count badge.
    pub badge: BadgeView,
    /// Whether the item list is shown.
    pub list_visible: bool,
    /// Rows in cart order.
    pub rows: Vec<CartRowView>,
    /// Total price with currency label.
    pub total_text: String,
    /// Shown exactly when the item list is empty.
    pub empty_message_visible: bool,
    /// Raw totals the texts were derived from.
    pub totals: CartTotals,
}

impl CartView {
    /// Project a cart into its render model.
    pub fn build(cart: &Cart, currency_label: &str) -> Self {
        let totals = cart.totals();
        let rows: Vec<CartRowView> = cart
            .iter()
            .map(|item| CartRowView::from_item(item, currency_label))
            .collect();
        let has_rows = !rows.is_empty();

        Self {
            badge: BadgeView {
                text: totals.item_count.to_string(),
                visible: totals.item_count > 0,
            },
            list_visible: has_rows,
            rows,
            total_text: totals.display_total(currency_label),
            empty_message_visible: !has_rows,
            totals,
        }
    }

    /// Whether the view shows an empty cart.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for CartView {
    fn default() -> Self {
        Self::build(&Cart::new(), crate::config::DEFAULT_CURRENCY_LABEL)
    }
}
