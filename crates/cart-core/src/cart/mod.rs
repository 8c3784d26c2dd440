//! Shopping cart module.
//!
//! Contains the cart, its line items and the derived totals.

mod cart;
mod totals;

pub use cart::{AddOutcome, Cart, LineItem, ProductCandidate, MAX_QUANTITY_PER_ITEM};
pub use totals::CartTotals;
