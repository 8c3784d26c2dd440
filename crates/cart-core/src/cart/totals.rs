//! Cart totals.

use crate::cart::LineItem;
use crate::price::format_price;
use serde::{Deserialize, Serialize};

/// Aggregates derived from a cart's items.
///
/// Always computed fresh from the items; nothing is cached between
/// mutations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CartTotals {
    /// Sum of quantities.
    pub item_count: u64,
    /// Sum of price times quantity.
    pub total_price: f64,
}

impl CartTotals {
    /// Compute totals over a slice of line items.
    pub fn compute(items: &[LineItem]) -> Self {
        Self {
            item_count: items.iter().map(|i| u64::from(i.quantity)).sum(),
            total_price: items.iter().fold(0.0, |acc, i| acc + i.subtotal()),
        }
    }

    /// Check if there are no items.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Whether the total is a usable number.
    pub fn has_valid_total(&self) -> bool {
        self.total_price.is_finite()
    }

    /// Format the total with a currency label, e.g. `"R$ 35.00"`.
    pub fn display_total(&self, label: &str) -> String {
        format_price(label, self.total_price)
    }
}
