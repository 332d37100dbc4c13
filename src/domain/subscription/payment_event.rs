//! Creem webhook payload normalization.
//!
//! Creem has delivered two incompatible payload shapes to the same endpoint:
//!
//! - **Flat**: `event_type`, `customer_id`, `subscription_id`, `status`,
//!   `user_email` at the top level.
//! - **Nested**: `eventType` at the top level with the subject under
//!   `object` (`object.customer.email`, `object.customer.id`,
//!   `object.subscription.id`, `object.status`).
//!
//! The presence of an `object` field selects the nested reading. Both are
//! reduced to one [`PaymentEvent`].

use serde::Serialize;
use serde_json::Value;

/// What a payment event means for the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Grants the paid plan.
    Activated,
    /// Returns the user to the free plan.
    Deactivated,
    /// Acknowledged without any state change.
    Unhandled,
}

impl EventKind {
    /// Maps a Creem event type string. Matching is case-sensitive.
    pub fn from_event_type(event_type: &str) -> Self {
        match event_type {
            "checkout.completed"
            | "payment.succeeded"
            | "subscription.created"
            | "subscription.activated" => EventKind::Activated,
            "subscription.cancelled" | "subscription.expired" | "payment.failed" => {
                EventKind::Deactivated
            }
            _ => EventKind::Unhandled,
        }
    }

    pub fn changes_state(&self) -> bool {
        !matches!(self, EventKind::Unhandled)
    }
}

/// Which payload layout the event was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    Flat,
    Nested,
    Unrecognized,
}

impl PayloadShape {
    pub fn detect(body: &Value) -> Self {
        if body.get("object").map_or(false, Value::is_object) {
            PayloadShape::Nested
        } else if FLAT_KEYS.iter().any(|key| body.get(key).is_some()) {
            PayloadShape::Flat
        } else {
            PayloadShape::Unrecognized
        }
    }
}

const FLAT_KEYS: [&str; 3] = ["event_type", "user_email", "customer_id"];

/// Canonical event extracted from a webhook body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentEvent {
    pub kind: EventKind,
    pub shape: PayloadShape,
    /// Provider event type exactly as received.
    pub event_type: Option<String>,
    /// Provider event id, when the payload carries one.
    pub event_id: Option<String>,
    pub customer_email: Option<String>,
    pub external_customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub raw_status: Option<String>,
}

impl PaymentEvent {
    /// Reads a parsed webhook body into a canonical event.
    ///
    /// Never fails: missing or mistyped fields become `None`, and a body
    /// matching neither shape yields an `Unhandled` event.
    pub fn normalize(body: &Value) -> Self {
        match PayloadShape::detect(body) {
            PayloadShape::Nested => Self::from_nested(body),
            PayloadShape::Flat => Self::from_flat(body),
            PayloadShape::Unrecognized => PaymentEvent {
                shape: PayloadShape::Unrecognized,
                event_type: string_field(body, "eventType"),
                event_id: string_field(body, "id"),
                ..Self::unhandled_without_type()
            },
        }
    }

    fn from_flat(body: &Value) -> Self {
        let event_type = string_field(body, "event_type");
        PaymentEvent {
            kind: kind_of(event_type.as_deref()),
            shape: PayloadShape::Flat,
            event_type,
            event_id: string_field(body, "id"),
            customer_email: string_field(body, "user_email"),
            external_customer_id: string_field(body, "customer_id"),
            subscription_id: string_field(body, "subscription_id"),
            raw_status: string_field(body, "status"),
        }
    }

    fn from_nested(body: &Value) -> Self {
        let event_type = string_field(body, "eventType");
        let object = &body["object"];
        let customer = object.get("customer");

        // `customer` and `subscription` are expanded objects on most events
        // but plain id strings on some.
        let (customer_email, external_customer_id) = match customer {
            Some(Value::Object(_)) => (
                customer.and_then(|c| string_field(c, "email")),
                customer.and_then(|c| string_field(c, "id")),
            ),
            Some(Value::String(id)) => (None, non_empty(id)),
            _ => (None, None),
        };
        let subscription_id = match object.get("subscription") {
            Some(sub @ Value::Object(_)) => string_field(sub, "id"),
            Some(Value::String(id)) => non_empty(id),
            _ => None,
        };

        PaymentEvent {
            kind: kind_of(event_type.as_deref()),
            shape: PayloadShape::Nested,
            event_type,
            event_id: string_field(body, "id"),
            customer_email,
            external_customer_id,
            subscription_id,
            raw_status: string_field(object, "status"),
        }
    }

    fn unhandled_without_type() -> Self {
        PaymentEvent {
            kind: EventKind::Unhandled,
            shape: PayloadShape::Unrecognized,
            event_type: None,
            event_id: None,
            customer_email: None,
            external_customer_id: None,
            subscription_id: None,
            raw_status: None,
        }
    }

    /// An unhandled event of the given type, with no customer data.
    pub fn unhandled(event_type: impl Into<String>) -> Self {
        PaymentEvent {
            shape: PayloadShape::Flat,
            event_type: Some(event_type.into()),
            ..Self::unhandled_without_type()
        }
    }
}

fn kind_of(event_type: Option<&str>) -> EventKind {
    event_type.map_or(EventKind::Unhandled, EventKind::from_event_type)
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).and_then(non_empty)
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
