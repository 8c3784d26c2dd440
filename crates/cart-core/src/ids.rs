//! Newtype identifier for products in the cart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product identifier; the uniqueness key of a line item within a cart.
///
/// Serialized as a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str() {
        let id: ProductId = "tee-01".into();
        assert_eq!(id.as_str(), "tee-01");
        assert_eq!(format!("{}", id), "tee-01");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("hoodie-02");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"hoodie-02\"");
        let back: ProductId = serde_json::from_str("\"hoodie-02\"").unwrap();
        assert_eq!(back, id);
    }
}
