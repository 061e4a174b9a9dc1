//! Cart lines and product identifiers.

use serde::{Deserialize, Serialize};

/// Catalog product code (e.g. `P001`).
///
/// A string newtype rather than a bare `String` so product references
/// cannot be mixed up with other identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID from a catalog code.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying catalog code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One distinct product in the cart.
///
/// Invariant: a cart holds at most one line per product, and a line with
/// quantity 0 is removed rather than stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartLine {
    /// Create a new line with quantity 1.
    #[must_use]
    pub const fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 1,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn product_id_is_transparent_on_the_wire() {
        let id = ProductId::from("P001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"P001\"");

        let parsed: ProductId = serde_json::from_str("\"P002\"").unwrap();
        assert_eq!(parsed.as_str(), "P002");
    }

    #[test]
    fn cart_line_roundtrip() {
        let line = CartLine {
            product_id: ProductId::from("P005"),
            quantity: 3,
        };
        let json = serde_json::to_string(&line).unwrap();
        let back: CartLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn new_line_starts_at_one() {
        assert_eq!(CartLine::new(ProductId::from("P001")).quantity, 1);
    }
}
