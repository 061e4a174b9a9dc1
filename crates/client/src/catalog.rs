//! Read-only product catalog lookup.
//!
//! The catalog is an external collaborator: a fixed id-to-product table
//! supplied by the environment at construction time. Nothing in this crate
//! mutates it.

use std::collections::HashMap;

use rust_decimal::Decimal;
use vitrine_core::{Product, ProductId};

/// Fixed lookup table from product ID to catalog entry.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
}

impl Catalog {
    /// Build a catalog from the supplied entries.
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
        }
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Unit price for a product, if the catalog knows it.
    #[must_use]
    pub fn price(&self, id: &ProductId) -> Option<Decimal> {
        self.products.get(id).map(|p| p.price)
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
