//! Fire-and-forget delivery to the telemetry endpoint.
//!
//! Delivery is best-effort by design: a failed or slow send is logged and
//! dropped, never retried and never surfaced to the interaction that
//! produced the event. Multiple sends may be in flight concurrently with
//! no ordering guarantee.

use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;
use url::Url;

use vitrine_core::EventRecord;

/// Path of the event-logging endpoint on the telemetry server.
const LOG_EVENT_PATH: &str = "/api/log-event";

/// Errors constructing a transport. Delivery itself has no error path.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Base URL could not be parsed into an endpoint.
    #[error("invalid telemetry endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// HTTP client failed to build.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Destination for captured event records.
///
/// `send` must return without waiting for delivery; implementations own
/// whatever asynchrony that requires.
pub trait TelemetrySink: Send + Sync {
    /// Hand one record to the pipeline.
    fn send(&self, record: EventRecord);
}

/// HTTP transport posting records to `POST /api/log-event`.
///
/// Each send is spawned onto the Tokio runtime and forgotten; the caller
/// must therefore be running inside one.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport delivering to the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP
    /// client fails to build.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(base_url)?.join(LOG_EVENT_PATH)?;
        let client = Client::builder().build()?;
        Ok(Self { client, endpoint })
    }

    /// The resolved endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Sink that fans one record out to several destinations.
///
/// Mirrors how the storefront wiring reports each interaction to both the
/// first-party endpoint and the analytics pixel. Each destination fails
/// independently.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn TelemetrySink>>,
}

impl FanoutSink {
    /// Create a fanout over the given destinations.
    #[must_use]
    pub fn new(sinks: impl IntoIterator<Item = Arc<dyn TelemetrySink>>) -> Self {
        Self {
            sinks: sinks.into_iter().collect(),
        }
    }
}

impl TelemetrySink for FanoutSink {
    fn send(&self, record: EventRecord) {
        for sink in &self.sinks {
            sink.send(record.clone());
        }
    }
}

impl TelemetrySink for HttpTransport {
    fn send(&self, record: EventRecord) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        tokio::spawn(async move {
            match client.post(endpoint).json(&record).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(
                        event_type = %record.event_type,
                        element = %record.element,
                        "event delivered"
                    );
                }
                Ok(response) => {
                    tracing::warn!(
                        status = %response.status(),
                        event_type = %record.event_type,
                        "telemetry endpoint rejected event"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        event_type = %record.event_type,
                        "event delivery failed"
                    );
                }
            }
        });
    }
}
