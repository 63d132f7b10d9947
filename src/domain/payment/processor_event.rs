//! Webhook events delivered by the payment processor.
//!
//! The envelope is parsed leniently; only the fields needed to route an
//! event and describe its payment intent are captured.

use serde::{Deserialize, Serialize};

use super::webhook_errors::WebhookError;
use super::{MinorAmount, PaymentIntentId, PaymentMetadata};

/// Processor webhook envelope (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Event identifier (`evt_...`).
    #[serde(default)]
    pub id: String,

    /// Event type, e.g. `payment_intent.succeeded`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Creation time (Unix seconds).
    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub data: StripeEventData,

    #[serde(default)]
    pub livemode: bool,
}

/// Container for the object that triggered the event.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StripeEventData {
    #[serde(default)]
    pub object: serde_json::Value,
}

/// Event types this service reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    PaymentIntentSucceeded,
    PaymentIntentPaymentFailed,
    Unknown,
}

impl StripeEventType {
    pub fn parse(s: &str) -> Self {
        match s {
            "payment_intent.succeeded" => Self::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => Self::PaymentIntentPaymentFailed,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentIntentSucceeded => "payment_intent.succeeded",
            Self::PaymentIntentPaymentFailed => "payment_intent.payment_failed",
            Self::Unknown => "unknown",
        }
    }
}

impl StripeEvent {
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::parse(&self.event_type)
    }
}

/// Payment intent fields embedded in a webhook event.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentSnapshot {
    pub id: PaymentIntentId,
    pub amount: MinorAmount,
    pub currency: String,
    pub metadata: PaymentMetadata,
}

#[derive(Deserialize)]
struct RawIntentObject {
    id: String,
    amount: Option<i64>,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    metadata: PaymentMetadata,
}

impl TryFrom<&serde_json::Value> for PaymentIntentSnapshot {
    type Error = WebhookError;

    fn try_from(object: &serde_json::Value) -> Result<Self, Self::Error> {
        let raw = RawIntentObject::deserialize(object)
            .map_err(|e| WebhookError::ParseError(format!("payment intent object: {}", e)))?;
        let id = PaymentIntentId::new(raw.id)
            .map_err(|_| WebhookError::MissingField("data.object.id"))?;
        let amount = raw
            .amount
            .ok_or(WebhookError::MissingField("data.object.amount"))?;

        Ok(Self {
            id,
            amount: MinorAmount::new(amount),
            currency: raw.currency,
            metadata: raw.metadata,
        })
    }
}

/// A verified webhook event, routed by type.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorEvent {
    PaymentIntentSucceeded(PaymentIntentSnapshot),
    PaymentIntentFailed(PaymentIntentSnapshot),
    /// Any other type. Always acknowledged, never acted on.
    Other { event_type: String },
}

impl ProcessorEvent {
    /// Routes an envelope to a handled variant.
    ///
    /// # Errors
    ///
    /// Fails only for handled types whose object is not a payment intent.
    pub fn from_envelope(event: &StripeEvent) -> Result<Self, WebhookError> {
        match event.parsed_type() {
            StripeEventType::PaymentIntentSucceeded => Ok(Self::PaymentIntentSucceeded(
                PaymentIntentSnapshot::try_from(&event.data.object)?,
            )),
            StripeEventType::PaymentIntentPaymentFailed => Ok(Self::PaymentIntentFailed(
                PaymentIntentSnapshot::try_from(&event.data.object)?,
            )),
            StripeEventType::Unknown => Ok(Self::Other {
                event_type: event.event_type.clone(),
            }),
        }
    }

    pub fn event_type(&self) -> &str {
        match self {
            Self::PaymentIntentSucceeded(_) => StripeEventType::PaymentIntentSucceeded.as_str(),
            Self::PaymentIntentFailed(_) => StripeEventType::PaymentIntentPaymentFailed.as_str(),
            Self::Other { event_type } => event_type,
        }
    }
}

/// Builder for test webhook payloads.
#[cfg(test)]
pub struct StripeEventBuilder {
    id: String,
    event_type: String,
    created: i64,
    object: serde_json::Value,
}

#[cfg(test)]
impl Default for StripeEventBuilder {
    fn default() -> Self {
        Self {
            id: "evt_test_123".to_string(),
            event_type: "payment_intent.succeeded".to_string(),
            created: chrono::Utc::now().timestamp(),
            object: serde_json::json!({
                "id": "pi_test_123",
                "object": "payment_intent",
                "amount": 4999,
                "currency": "usd",
                "status": "succeeded",
                "metadata": { "userId": "user-1" }
            }),
        }
    }
}

#[cfg(test)]
impl StripeEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn object(mut self, object: serde_json::Value) -> Self {
        self.object = object;
        self
    }

    pub fn build(self) -> StripeEvent {
        StripeEvent {
            id: self.id,
            event_type: self.event_type,
            created: self.created,
            data: StripeEventData { object: self.object },
            livemode: false,
        }
    }

    pub fn to_json(self) -> String {
        serde_json::to_string(&self.build()).expect("event serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_minimal_envelope() {
        let event: StripeEvent =
            serde_json::from_value(json!({ "type": "charge.refunded" })).unwrap();

        assert_eq!(event.event_type, "charge.refunded");
        assert_eq!(event.parsed_type(), StripeEventType::Unknown);
        assert!(event.data.object.is_null());
    }

    #[test]
    fn routes_succeeded_event() {
        let event = StripeEventBuilder::new().build();

        let routed = ProcessorEvent::from_envelope(&event).unwrap();

        match routed {
            ProcessorEvent::PaymentIntentSucceeded(snapshot) => {
                assert_eq!(snapshot.id.as_str(), "pi_test_123");
                assert_eq!(snapshot.amount.value(), 4999);
                assert_eq!(snapshot.currency, "usd");
                assert_eq!(snapshot.metadata.get("userId").map(String::as_str), Some("user-1"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn routes_failed_event() {
        let event = StripeEventBuilder::new()
            .event_type("payment_intent.payment_failed")
            .build();

        let routed = ProcessorEvent::from_envelope(&event).unwrap();

        assert!(matches!(routed, ProcessorEvent::PaymentIntentFailed(_)));
        assert_eq!(routed.event_type(), "payment_intent.payment_failed");
    }

    #[test]
    fn unknown_types_become_other() {
        let event = StripeEventBuilder::new()
            .event_type("customer.created")
            .object(json!({ "id": "cus_1" }))
            .build();

        let routed = ProcessorEvent::from_envelope(&event).unwrap();

        assert_eq!(
            routed,
            ProcessorEvent::Other {
                event_type: "customer.created".to_string()
            }
        );
    }

    #[test]
    fn handled_type_without_intent_object_fails() {
        let event = StripeEventBuilder::new().object(json!({ "amount": 100 })).build();

        let result = ProcessorEvent::from_envelope(&event);

        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn intent_without_amount_is_missing_field() {
        let event = StripeEventBuilder::new()
            .object(json!({ "id": "pi_no_amount", "currency": "usd" }))
            .build();

        let result = ProcessorEvent::from_envelope(&event);

        assert!(matches!(result, Err(WebhookError::MissingField("data.object.amount"))));
    }

    #[test]
    fn blank_intent_id_is_missing_field() {
        let event = StripeEventBuilder::new().object(json!({ "id": "" })).build();

        let result = ProcessorEvent::from_envelope(&event);

        assert!(matches!(result, Err(WebhookError::MissingField("data.object.id"))));
    }
}
