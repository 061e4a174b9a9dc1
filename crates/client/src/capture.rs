//! UI interaction capture.
//!
//! [`Tracker`] translates the finite set of recognized storefront
//! interactions into [`EventRecord`]s and hands them to a
//! [`TelemetrySink`] without blocking the interaction itself. Cart-side
//! effects (add/remove) go through the [`CartStore`] after the event is
//! dispatched, exactly as the UI wiring does.

use std::sync::Arc;

use vitrine_core::{EventRecord, EventType, Page, ProductId};

use crate::cart::CartStore;
use crate::identity::IdentityProvider;
use crate::transport::TelemetrySink;

/// Derive the page from a navigation path.
///
/// Anything that is not one of the known subpages is the home page.
#[must_use]
pub fn page_from_path(path: &str) -> Page {
    if path.contains("product.html") {
        Page::Product
    } else if path.contains("cart.html") {
        Page::Cart
    } else if path.contains("about.html") {
        Page::About
    } else {
        Page::Home
    }
}

/// Lowercase a link label and join its words with underscores.
fn slug(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Watches UI interactions and forwards event records to the sink.
pub struct Tracker {
    identity: IdentityProvider,
    cart: Arc<CartStore>,
    sink: Arc<dyn TelemetrySink>,
    page: Page,
}

impl Tracker {
    /// Create a tracker for the given page context.
    #[must_use]
    pub fn new(
        identity: IdentityProvider,
        cart: Arc<CartStore>,
        sink: Arc<dyn TelemetrySink>,
        page: Page,
    ) -> Self {
        Self {
            identity,
            cart,
            sink,
            page,
        }
    }

    /// The current page context.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Update the page context after a navigation.
    pub fn set_page(&mut self, page: Page) {
        self.page = page;
    }

    /// Record a page load. `product_id` is set on product detail pages.
    pub fn track_page_visit(&self, product_id: Option<ProductId>) {
        self.log_event(EventType::PageVisit, "page_load", product_id);
    }

    /// Record a navigation link activation.
    pub fn track_nav_click(&self, link_text: &str) {
        let element = format!("nav_{}", slug(link_text));
        self.log_event(EventType::Click, &element, None);
    }

    /// Record a "view details" activation.
    pub fn track_view_details(&self, product_id: ProductId) {
        self.log_event(EventType::ViewDetails, "view_details_button", Some(product_id));
    }

    /// Record an "add to cart" activation and add the product to the cart.
    pub fn track_add_to_cart(&self, product_id: ProductId) {
        self.log_event(
            EventType::AddToCart,
            "add_to_cart_button",
            Some(product_id.clone()),
        );
        self.cart.add_item(&product_id);
    }

    /// Record a "remove from cart" activation and remove the product.
    pub fn track_remove_from_cart(&self, product_id: ProductId) {
        self.log_event(
            EventType::RemoveFromCart,
            "remove_from_cart_button",
            Some(product_id.clone()),
        );
        self.cart.remove_item(&product_id);
    }

    /// Record a generic button click (`increase_quantity`,
    /// `decrease_quantity`, `checkout_button`, ...).
    pub fn track_button_click(&self, button: &str, product_id: Option<ProductId>) {
        self.log_event(EventType::Click, button, product_id);
    }

    /// Build a record from the current context and fire it at the sink.
    fn log_event(&self, event_type: EventType, element: &str, product_id: Option<ProductId>) {
        let record = EventRecord {
            event_type,
            page: self.page,
            element: element.to_owned(),
            product_id,
            user_id: self.identity.user_id(),
        };
        self.sink.send(record);
    }
}
