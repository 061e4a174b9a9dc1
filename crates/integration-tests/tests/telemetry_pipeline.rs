//! End-to-end pipeline tests: UI action -> capture -> transport ->
//! persistence.
//!
//! Drives the real client components against a live in-process server and
//! asserts on what lands on disk. Transport is fire-and-forget, so tests
//! poll the logs directory instead of awaiting a completion signal.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::Value;

use vitrine_client::{Catalog, CartStore, HttpTransport, IdentityProvider, MemoryStore, Tracker};
use vitrine_core::{Page, Product, ProductId};
use vitrine_integration_tests::{TestServer, spawn_server, stored_event_files};

fn demo_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::new([
        Product::new("P001", "Wireless Bluetooth Headphones", Decimal::new(19999, 2)),
        Product::new("P005", "Premium Coffee Maker", Decimal::new(12999, 2)),
        Product::new("P010", "Ceramic Pour-Over Set", Decimal::new(5499, 2)),
    ]))
}

/// Wait until at least `expected` event files exist, or time out.
async fn await_stored_events(server: &TestServer, expected: usize) -> Vec<Value> {
    for _ in 0..100 {
        let files = stored_event_files(&server.logs_dir);
        if files.len() >= expected {
            return files
                .iter()
                .map(|path| {
                    let raw = std::fs::read_to_string(path).unwrap();
                    serde_json::from_str(&raw).unwrap()
                })
                .collect();
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!(
        "expected {expected} stored events, found {}",
        stored_event_files(&server.logs_dir).len()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn browsing_session_is_recorded_and_cart_stays_consistent() {
    let server = spawn_server().await;

    let storage = Arc::new(MemoryStore::new());
    let cart = Arc::new(CartStore::new(storage.clone(), demo_catalog()));
    let transport = Arc::new(HttpTransport::new(&server.base_url).unwrap());
    let mut tracker = Tracker::new(
        IdentityProvider::new(storage),
        Arc::clone(&cart),
        transport,
        Page::Home,
    );

    // A short browsing session, mirroring a real storefront visit.
    tracker.track_page_visit(None);
    tracker.track_add_to_cart(ProductId::from("P001"));
    tracker.track_add_to_cart(ProductId::from("P001"));
    tracker.track_view_details(ProductId::from("P010"));
    tracker.set_page(Page::Cart);
    tracker.track_page_visit(None);
    tracker.track_add_to_cart(ProductId::from("P005"));
    tracker.track_button_click("checkout_button", None);

    // Cart state is visible immediately, independent of telemetry.
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Decimal::new(52997, 2)); // 2 x 199.99 + 129.99

    let events = await_stored_events(&server, 7).await;
    assert_eq!(events.len(), 7);

    // Every record correlates to the same pseudonymous user.
    let user_ids: std::collections::HashSet<_> = events
        .iter()
        .map(|e| e.get("user_id").unwrap().as_str().unwrap().to_owned())
        .collect();
    assert_eq!(user_ids.len(), 1);
    assert!(user_ids.iter().next().unwrap().starts_with("anonymous_"));

    // The event mix matches what the session did.
    let count_of = |event_type: &str| {
        events
            .iter()
            .filter(|e| e.get("event_type").unwrap() == event_type)
            .count()
    };
    assert_eq!(count_of("page_visit"), 2);
    assert_eq!(count_of("add_to_cart"), 3);
    assert_eq!(count_of("view_details"), 1);
    assert_eq!(count_of("click"), 1);

    // Every stored record has the full fixed shape.
    for event in &events {
        let object = event.as_object().unwrap();
        for field in ["timestamp", "event_type", "page", "element", "product_id", "user_id"] {
            assert!(object.contains_key(field), "missing field {field}");
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn remove_from_cart_round_trips() {
    let server = spawn_server().await;

    let storage = Arc::new(MemoryStore::new());
    let cart = Arc::new(CartStore::new(storage.clone(), demo_catalog()));
    let transport = Arc::new(HttpTransport::new(&server.base_url).unwrap());
    let tracker = Tracker::new(
        IdentityProvider::new(storage),
        Arc::clone(&cart),
        transport,
        Page::Cart,
    );

    tracker.track_add_to_cart(ProductId::from("P005"));
    tracker.track_remove_from_cart(ProductId::from("P005"));

    assert_eq!(cart.item_count(), 0);

    let events = await_stored_events(&server, 2).await;
    let removal = events
        .iter()
        .find(|e| e.get("event_type").unwrap() == "remove_from_cart")
        .unwrap();
    assert_eq!(removal.get("element").unwrap(), "remove_from_cart_button");
    assert_eq!(removal.get("product_id").unwrap(), "P005");
    assert_eq!(removal.get("page").unwrap(), "cart");
}

#[tokio::test(flavor = "multi_thread")]
async fn telemetry_failure_never_touches_the_cart() {
    // Point the transport at a dead endpoint; the shopping flow must be
    // oblivious.
    let storage = Arc::new(MemoryStore::new());
    let cart = Arc::new(CartStore::new(storage.clone(), demo_catalog()));
    let transport = Arc::new(HttpTransport::new("http://127.0.0.1:9").unwrap());
    let tracker = Tracker::new(
        IdentityProvider::new(storage),
        Arc::clone(&cart),
        transport,
        Page::Home,
    );

    tracker.track_add_to_cart(ProductId::from("P001"));
    tracker.track_add_to_cart(ProductId::from("P005"));

    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total(), Decimal::new(32998, 2));

    // Give the doomed sends time to fail in the background.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(cart.item_count(), 2);
}
