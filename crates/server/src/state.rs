//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::persister::EventPersister;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the event persister.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    persister: EventPersister,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, persister: EventPersister) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, persister }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the event persister.
    #[must_use]
    pub fn persister(&self) -> &EventPersister {
        &self.inner.persister
    }
}
