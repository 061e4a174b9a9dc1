//! Google Analytics 4 forwarding sink.
//!
//! A second, optional destination for captured events. Unlike the primary
//! transport, GA events are enriched from the product catalog (item name
//! and price) the way GA4 e-commerce reports expect. Delivery goes through
//! the Measurement Protocol and is just as fire-and-forget as the primary
//! pipeline: failures are logged and dropped.

use std::sync::Arc;

use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Value, json};
use url::Url;

use vitrine_core::{EventRecord, EventType};

use crate::catalog::Catalog;
use crate::transport::{TelemetrySink, TransportError};

/// GA4 Measurement Protocol collection endpoint.
const COLLECT_URL: &str = "https://www.google-analytics.com/mp/collect";

/// Google Analytics configuration.
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// GA4 measurement ID (e.g. `G-8K7ZLGSQKP`).
    pub measurement_id: String,
    /// Measurement Protocol API secret for the data stream.
    pub api_secret: String,
}

/// Sink forwarding events to GA4 with catalog enrichment.
#[derive(Clone)]
pub struct GaTransport {
    client: Client,
    endpoint: Url,
    catalog: Arc<Catalog>,
}

impl GaTransport {
    /// Create a GA transport for the configured data stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &GaConfig, catalog: Arc<Catalog>) -> Result<Self, TransportError> {
        let mut endpoint = Url::parse(COLLECT_URL)?;
        endpoint
            .query_pairs_mut()
            .append_pair("measurement_id", &config.measurement_id)
            .append_pair("api_secret", &config.api_secret);

        Ok(Self {
            client: Client::builder().build()?,
            endpoint,
            catalog,
        })
    }

    /// Map a record onto a GA4 event body, or `None` for interactions GA
    /// has no event for.
    fn event_body(&self, record: &EventRecord) -> Option<Value> {
        let (name, params) = match record.event_type {
            EventType::PageVisit => (
                "page_view",
                json!({ "custom_page": record.page.as_str() }),
            ),
            EventType::ViewDetails => ("view_item", self.item_params(record, false)?),
            EventType::AddToCart => ("add_to_cart", self.item_params(record, true)?),
            EventType::RemoveFromCart => ("remove_from_cart", self.item_params(record, true)?),
            EventType::Click => {
                record.element.strip_prefix("nav_").map_or_else(
                    || ("click", json!({ "element_name": record.element })),
                    |link| ("navigation_click", json!({ "link_name": link })),
                )
            }
            EventType::Unknown => return None,
        };

        Some(json!({
            "client_id": record.user_id,
            "events": [{ "name": name, "params": params }],
        }))
    }

    /// GA4 e-commerce item parameters, enriched from the catalog.
    fn item_params(&self, record: &EventRecord, with_quantity: bool) -> Option<Value> {
        let product_id = record.product_id.as_ref()?;
        let product = self.catalog.get(product_id);

        let price = product
            .map(|p| p.price.to_f64().unwrap_or(0.0))
            .unwrap_or(0.0);
        let name = product.map_or_else(|| product_id.to_string(), |p| p.name.clone());

        let mut item = json!({
            "item_id": product_id.as_str(),
            "item_name": name,
            "price": price,
        });
        if with_quantity {
            item["quantity"] = json!(1);
        }

        Some(json!({
            "currency": "USD",
            "value": price,
            "items": [item],
        }))
    }
}

impl TelemetrySink for GaTransport {
    fn send(&self, record: EventRecord) {
        let Some(body) = self.event_body(&record) else {
            tracing::debug!(event_type = %record.event_type, "no GA event for interaction, skipping");
            return;
        };

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            match client.post(endpoint).json(&body).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(event_type = %record.event_type, "GA event delivered");
                }
                Ok(response) => {
                    tracing::warn!(
                        status = %response.status(),
                        event_type = %record.event_type,
                        "GA rejected event"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, event_type = %record.event_type, "GA delivery failed");
                }
            }
        });
    }
}
