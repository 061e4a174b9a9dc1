//! Persistent cart state machine.
//!
//! [`CartStore`] exclusively owns cart persistence: every mutation is a
//! full read-modify-write of the serialized cart under one storage key.
//! Callers run on a single-threaded UI context, so no two mutations can
//! interleave mid-cycle and no locking is needed here.
//!
//! Storage problems never reach the caller: a corrupt or missing payload
//! reads as an empty cart, and a failed write is logged and swallowed so
//! the shopping flow always succeeds from the user's perspective.

use std::sync::Arc;

use rust_decimal::Decimal;

use vitrine_core::{CartLine, ProductId};

use crate::catalog::Catalog;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "vitrine_cart";

/// Callback invoked with the new item count after every cart mutation.
///
/// Generalizes the cart badge refresh: rendering code registers a hook
/// instead of the store touching any UI directly.
pub type CountChangedHook = Box<dyn Fn(u32) + Send + Sync>;

/// Persistent state machine for cart contents.
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    catalog: Arc<Catalog>,
    on_count_changed: Option<CountChangedHook>,
}

impl CartStore {
    /// Create a store over the given storage capability and catalog.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, catalog: Arc<Catalog>) -> Self {
        Self {
            storage,
            catalog,
            on_count_changed: None,
        }
    }

    /// Register the count-changed hook, replacing any previous one.
    #[must_use]
    pub fn with_count_changed_hook(mut self, hook: CountChangedHook) -> Self {
        self.on_count_changed = Some(hook);
        self
    }

    /// Current cart snapshot.
    ///
    /// A missing, unreadable, or corrupt payload reads as an empty cart.
    #[must_use]
    pub fn items(&self) -> Vec<CartLine> {
        let raw = match self.storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "cart storage unreadable, treating as empty");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cart payload corrupt, treating as empty");
            Vec::new()
        })
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    pub fn add_item(&self, product_id: &ProductId) -> Vec<CartLine> {
        let mut items = self.items();
        if let Some(line) = items.iter_mut().find(|l| &l.product_id == product_id) {
            line.quantity += 1;
        } else {
            items.push(CartLine::new(product_id.clone()));
        }
        self.save(&items);
        items
    }

    /// Delete the line for a product entirely. No-op if absent.
    pub fn remove_item(&self, product_id: &ProductId) -> Vec<CartLine> {
        let mut items = self.items();
        let before = items.len();
        items.retain(|l| &l.product_id != product_id);
        if items.len() != before {
            self.save(&items);
        }
        items
    }

    /// Set a line's quantity directly. A quantity of 0 removes the line.
    ///
    /// No-op if the product has no line in the cart.
    pub fn update_quantity(&self, product_id: &ProductId, quantity: u32) -> Vec<CartLine> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        let mut items = self.items();
        if let Some(line) = items.iter_mut().find(|l| &l.product_id == product_id) {
            line.quantity = quantity;
            self.save(&items);
        }
        items
    }

    /// Cart total: sum of catalog price times quantity over all lines.
    ///
    /// A line whose product is missing from the catalog contributes zero.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items()
            .iter()
            .map(|line| {
                self.catalog
                    .price(&line.product_id)
                    .unwrap_or_default()
                    * Decimal::from(line.quantity)
            })
            .sum()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items().iter().map(|line| line.quantity).sum()
    }

    /// Delete all cart state in a single storage write.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(CART_STORAGE_KEY) {
            tracing::warn!(error = %e, "failed to clear cart storage");
        }
        self.notify(0);
    }

    /// Persist a full snapshot and fire the count-changed hook.
    fn save(&self, items: &[CartLine]) {
        match serde_json::to_string(items) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(CART_STORAGE_KEY, &raw) {
                    tracing::warn!(error = %e, "cart snapshot not persisted");
                }
            }
            Err(e) => tracing::warn!(error = %e, "cart snapshot not serializable"),
        }
        self.notify(items.iter().map(|l| l.quantity).sum());
    }

    fn notify(&self, count: u32) {
        if let Some(hook) = &self.on_count_changed {
            hook(count);
        }
    }
}
