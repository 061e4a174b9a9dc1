//! Catalog entries.
//!
//! The product catalog itself is an external collaborator supplied by the
//! environment; this is only the shape of one entry in it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::cart::ProductId;

/// One entry in the read-only product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Unit price. Kept in `Decimal` so cart totals stay exact.
    pub price: Decimal,
    pub image: String,
    /// Marketing badge shown on the product card ("Best Seller", "New").
    pub badge: Option<String>,
}

impl Product {
    /// Convenience constructor for the fields that matter to the core
    /// pipeline; presentation fields default to empty.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            description: String::new(),
            price,
            image: String::new(),
            badge: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn price_is_exact() {
        let product = Product::new("P001", "Wireless Bluetooth Headphones", Decimal::new(19999, 2));
        assert_eq!(product.price.to_string(), "199.99");
    }
}
