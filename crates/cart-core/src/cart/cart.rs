//! Cart and line item types.

use crate::cart::CartTotals;
use crate::error::CartError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// Product data supplied by an "add to cart" interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCandidate {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price; NaN when the page supplied a non-numeric price.
    pub price: f64,
    /// Image URL.
    pub image: String,
}

impl ProductCandidate {
    /// Create a new candidate.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    /// Whether the price is a usable number.
    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite()
    }
}

/// Result of adding a candidate to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended with quantity 1.
    Inserted,
    /// An existing line item's quantity was bumped.
    Incremented { quantity: u32 },
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product ID, unique within the cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub name: String,
    /// Unit price; non-finite prices are held as NaN.
    #[serde(with = "crate::price::nan_as_null", default = "crate::price::missing")]
    pub price: f64,
    /// Image URL. A row written without one loads with an empty string.
    #[serde(default)]
    pub image: String,
    /// Quantity, at least 1 for every stored item.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item with quantity 1 from a candidate.
    pub fn from_candidate(candidate: ProductCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            price: if candidate.price.is_finite() {
                candidate.price
            } else {
                f64::NAN
            },
            image: candidate.image,
            quantity: 1,
        }
    }

    /// Price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A shopping cart: line items in insertion order, keyed by product ID.
///
/// Serializes as the bare JSON array of its items. Deserializing normalizes
/// the array: duplicate IDs are merged into the first occurrence and
/// zero-quantity rows are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw items, normalizing them.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self::normalize(items).0
    }

    /// Normalize raw items, returning the cart and how many rows were
    /// merged or dropped to get there.
    pub fn normalize(raw: Vec<LineItem>) -> (Self, usize) {
        let mut adjusted = 0;
        let mut items: Vec<LineItem> = Vec::with_capacity(raw.len());

        for item in raw {
            if item.quantity == 0 {
                adjusted += 1;
                continue;
            }
            if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
                existing.quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
                adjusted += 1;
                continue;
            }
            items.push(item);
        }

        (Self { items }, adjusted)
    }

    /// Add a product to the cart.
    ///
    /// An existing item with the same ID gets its quantity incremented by
    /// one; its name, price and image keep the values from the first add.
    /// Otherwise a new item is appended with quantity 1.
    ///
    /// Returns an error, leaving the cart unchanged, if the increment would
    /// exceed [`MAX_QUANTITY_PER_ITEM`].
    pub fn add(&mut self, candidate: ProductCandidate) -> Result<AddOutcome, CartError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == candidate.id) {
            let new_quantity = existing.quantity.saturating_add(1);
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CartError::QuantityExceedsLimit(
                    u64::from(new_quantity),
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            return Ok(AddOutcome::Incremented {
                quantity: new_quantity,
            });
        }

        self.items.push(LineItem::from_candidate(candidate));
        Ok(AddOutcome::Inserted)
    }

    /// Remove an item from the cart.
    ///
    /// Returns `false` (and changes nothing) if no item has this ID.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Decrease an item's quantity by one, removing it when it reaches zero.
    ///
    /// Returns `false` if no item has this ID.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(pos) = self.items.iter().position(|i| &i.id == id) else {
            return false;
        };
        if self.items[pos].quantity <= 1 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity -= 1;
        }
        true
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get an item by ID.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Compute totals fresh from the current items.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.items)
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
