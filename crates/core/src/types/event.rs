//! Tracked interaction records.
//!
//! An [`EventRecord`] is the canonical shape of one tracked user
//! interaction. Records are built on the client, shipped as JSON to the
//! telemetry endpoint, and normalized back into this shape before being
//! persisted. Unknown or missing values degrade to explicit sentinels so
//! every persisted record has the same, queryable set of fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::cart::ProductId;

/// Sentinel used for any required field that arrives missing or malformed.
pub const UNKNOWN: &str = "unknown";

/// Fallback user identifier for payloads that carry none.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Kind of tracked user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PageVisit,
    Click,
    ViewDetails,
    AddToCart,
    RemoveFromCart,
    /// Anything the pipeline does not recognize.
    #[default]
    #[serde(other)]
    Unknown,
}

impl EventType {
    /// Parse a wire value, degrading to [`Self::Unknown`] instead of failing.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "page_visit" => Self::PageVisit,
            "click" => Self::Click,
            "view_details" => Self::ViewDetails,
            "add_to_cart" => Self::AddToCart,
            "remove_from_cart" => Self::RemoveFromCart,
            _ => Self::Unknown,
        }
    }

    /// Wire representation of this event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PageVisit => "page_visit",
            Self::Click => "click",
            Self::ViewDetails => "view_details",
            Self::AddToCart => "add_to_cart",
            Self::RemoveFromCart => "remove_from_cart",
            Self::Unknown => UNKNOWN,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page the interaction happened on, derived from navigation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Product,
    Cart,
    About,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Page {
    /// Parse a wire value, degrading to [`Self::Unknown`] instead of failing.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "home" => Self::Home,
            "product" => Self::Product,
            "cart" => Self::Cart,
            "about" => Self::About,
            _ => Self::Unknown,
        }
    }

    /// Wire representation of this page.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Product => "product",
            Self::Cart => "cart",
            Self::About => "about",
            Self::Unknown => UNKNOWN,
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked user interaction, immutable once constructed.
///
/// The timestamp is deliberately absent: it is assigned by the server at
/// persistence time, never by the capturing client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_type: EventType,
    pub page: Page,
    /// Identifier of the UI control that triggered the event.
    pub element: String,
    /// Present only when the action concerns a specific product.
    /// Serialized as an explicit `null` when absent, never omitted.
    pub product_id: Option<ProductId>,
    /// Pseudonymous identifier, stable per client-storage lifetime.
    pub user_id: String,
}

impl EventRecord {
    /// Normalize an arbitrary JSON payload into a record.
    ///
    /// Missing or malformed fields are substituted with sentinels; this
    /// never fails on structural grounds.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Self {
        let field = |name: &str| payload.get(name).and_then(Value::as_str);

        Self {
            event_type: field("event_type").map_or(EventType::Unknown, EventType::parse),
            page: field("page").map_or(Page::Unknown, Page::parse),
            element: field("element").unwrap_or(UNKNOWN).to_owned(),
            product_id: field("product_id").map(ProductId::from),
            user_id: field("user_id").unwrap_or(ANONYMOUS_USER).to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_payload_full() {
        let payload = json!({
            "event_type": "add_to_cart",
            "page": "product",
            "element": "add_to_cart_button",
            "product_id": "P010",
            "user_id": "anon_x7k2m9qw41az",
        });

        let record = EventRecord::from_payload(&payload);
        assert_eq!(record.event_type, EventType::AddToCart);
        assert_eq!(record.page, Page::Product);
        assert_eq!(record.element, "add_to_cart_button");
        assert_eq!(record.product_id, Some(ProductId::from("P010")));
        assert_eq!(record.user_id, "anon_x7k2m9qw41az");
    }

    #[test]
    fn from_payload_empty_object_uses_sentinels() {
        let record = EventRecord::from_payload(&json!({}));
        assert_eq!(record.event_type, EventType::Unknown);
        assert_eq!(record.page, Page::Unknown);
        assert_eq!(record.element, UNKNOWN);
        assert_eq!(record.product_id, None);
        assert_eq!(record.user_id, ANONYMOUS_USER);
    }

    #[test]
    fn from_payload_non_object() {
        // A bare string has no extractable fields; every field degrades.
        let record = EventRecord::from_payload(&json!("not an event"));
        assert_eq!(record.event_type, EventType::Unknown);
        assert_eq!(record.user_id, ANONYMOUS_USER);
    }

    #[test]
    fn from_payload_unrecognized_values() {
        let payload = json!({
            "event_type": "teleport",
            "page": "wormhole",
            "element": 42,
            "product_id": null,
            "user_id": ["not", "a", "string"],
        });

        let record = EventRecord::from_payload(&payload);
        assert_eq!(record.event_type, EventType::Unknown);
        assert_eq!(record.page, Page::Unknown);
        assert_eq!(record.element, UNKNOWN);
        assert_eq!(record.product_id, None);
        assert_eq!(record.user_id, ANONYMOUS_USER);
    }

    #[test]
    fn missing_product_id_serializes_as_null() {
        let record = EventRecord::from_payload(&json!({"event_type": "click"}));
        let value = serde_json::to_value(&record).unwrap();
        // The field must be present and explicitly null, never absent.
        assert!(value.as_object().unwrap().contains_key("product_id"));
        assert!(value.get("product_id").unwrap().is_null());
    }

    #[test]
    fn unknown_variants_serialize_as_sentinel() {
        let record = EventRecord {
            event_type: EventType::Unknown,
            page: Page::Unknown,
            element: "page_load".to_owned(),
            product_id: None,
            user_id: ANONYMOUS_USER.to_owned(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value.get("event_type").unwrap(), "unknown");
        assert_eq!(value.get("page").unwrap(), "unknown");
    }

    #[test]
    fn wire_roundtrip() {
        let json = r#"{
            "event_type": "page_visit",
            "page": "home",
            "element": "page_load",
            "product_id": null,
            "user_id": "anonymous"
        }"#;

        let record: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.event_type, EventType::PageVisit);
        assert_eq!(record.page, Page::Home);
        assert_eq!(record.product_id, None);
    }

    #[test]
    fn deserialize_unknown_enum_value() {
        // #[serde(other)] catches values introduced by newer clients.
        let record: EventRecord = serde_json::from_str(
            r#"{"event_type":"hover","page":"checkout","element":"x","product_id":null,"user_id":"u"}"#,
        )
        .unwrap();
        assert_eq!(record.event_type, EventType::Unknown);
        assert_eq!(record.page, Page::Unknown);
    }
}
