//! Vitrine telemetry server - event logging and static assets.
//!
//! This binary serves the storefront demo on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework
//! - `POST /api/log-event` writes each event as a JSON file under a
//!   date-partitioned logs directory
//! - Static storefront assets served from the configured directory
//!
//! The server holds no cross-request state: every event request is
//! independently servable, and a persistence failure for one event never
//! affects the others.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_server::config::ServerConfig;
use vitrine_server::persister::EventPersister;
use vitrine_server::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize the event log root (idempotent)
    let persister =
        EventPersister::new(config.logs_dir.clone()).expect("Failed to initialize event log");
    tracing::info!(logs_dir = %persister.root().display(), "Event log ready");

    // Build application state and router
    let state = AppState::new(config.clone(), persister);
    let app = vitrine_server::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("telemetry server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
