//! HTTP route handlers for the telemetry server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health            - Liveness check
//! GET  /health/ready      - Readiness check (logs root writable)
//!
//! # Telemetry
//! POST /api/log-event     - Accept one event record, persist it durably
//!
//! # Static assets
//! GET  /*                 - Storefront pages and scripts (ServeDir fallback)
//! ```

pub mod events;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Create the telemetry API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/log-event", post(events::log_event))
}

/// Create all routes for the telemetry server.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}
