//! Admin-facing payment lifecycle events.
//!
//! These are relayed to connected administrator sessions. Amounts are in
//! major units; timestamps are RFC 3339.

use serde::Serialize;

use super::{PaymentIntentId, PaymentMetadata};
use crate::domain::foundation::{Timestamp, UserId};

/// A customer-driven step: intent created or confirmed as paid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentActivity {
    pub user_id: UserId,
    pub user_name: String,
    pub amount: f64,
    pub currency: String,
    pub payment_intent_id: PaymentIntentId,
    pub timestamp: Timestamp,
}

/// A processor-reported outcome received through the webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub payment_intent_id: PaymentIntentId,
    pub amount: f64,
    pub currency: String,
    pub metadata: PaymentMetadata,
    pub timestamp: Timestamp,
}

/// Event broadcast to the admin group.
///
/// Serializes as `{"event": "<name>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum AdminEvent {
    PaymentInitiated(PaymentActivity),
    PaymentCompleted(PaymentActivity),
    PaymentWebhookConfirmed(PaymentOutcome),
    PaymentFailed(PaymentOutcome),
}

impl AdminEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PaymentInitiated(_) => "payment-initiated",
            Self::PaymentCompleted(_) => "payment-completed",
            Self::PaymentWebhookConfirmed(_) => "payment-webhook-confirmed",
            Self::PaymentFailed(_) => "payment-failed",
        }
    }

    pub fn payment_intent_id(&self) -> &PaymentIntentId {
        match self {
            Self::PaymentInitiated(a) | Self::PaymentCompleted(a) => &a.payment_intent_id,
            Self::PaymentWebhookConfirmed(o) | Self::PaymentFailed(o) => &o.payment_intent_id,
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            Self::PaymentInitiated(a) | Self::PaymentCompleted(a) => a.amount,
            Self::PaymentWebhookConfirmed(o) | Self::PaymentFailed(o) => o.amount,
        }
    }

    pub fn currency(&self) -> &str {
        match self {
            Self::PaymentInitiated(a) | Self::PaymentCompleted(a) => &a.currency,
            Self::PaymentWebhookConfirmed(o) | Self::PaymentFailed(o) => &o.currency,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::PaymentInitiated(a) | Self::PaymentCompleted(a) => a.timestamp,
            Self::PaymentWebhookConfirmed(o) | Self::PaymentFailed(o) => o.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn activity() -> PaymentActivity {
        PaymentActivity {
            user_id: UserId::new("user-1").unwrap(),
            user_name: "Jane".to_string(),
            amount: 49.99,
            currency: "usd".to_string(),
            payment_intent_id: PaymentIntentId::new("pi_1").unwrap(),
            timestamp: Timestamp::now(),
        }
    }

    #[test]
    fn names_match_wire_events() {
        assert_eq!(AdminEvent::PaymentInitiated(activity()).name(), "payment-initiated");
        assert_eq!(AdminEvent::PaymentCompleted(activity()).name(), "payment-completed");
    }

    #[test]
    fn serializes_with_event_and_data() {
        let event = AdminEvent::PaymentCompleted(activity());

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["event"], json!("payment-completed"));
        assert_eq!(value["data"]["userId"], json!("user-1"));
        assert_eq!(value["data"]["userName"], json!("Jane"));
        assert_eq!(value["data"]["amount"], json!(49.99));
        assert_eq!(value["data"]["paymentIntentId"], json!("pi_1"));
        assert!(value["data"]["timestamp"].is_string());
    }

    #[test]
    fn outcome_carries_metadata() {
        let mut metadata = PaymentMetadata::new();
        metadata.insert("userId".to_string(), "user-9".to_string());
        let event = AdminEvent::PaymentFailed(PaymentOutcome {
            payment_intent_id: PaymentIntentId::new("pi_2").unwrap(),
            amount: 12.5,
            currency: "usd".to_string(),
            metadata,
            timestamp: Timestamp::now(),
        });

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["event"], json!("payment-failed"));
        assert_eq!(value["data"]["metadata"]["userId"], json!("user-9"));
        assert_eq!(event.payment_intent_id().as_str(), "pi_2");
        assert_eq!(event.amount(), 12.5);
    }
}
