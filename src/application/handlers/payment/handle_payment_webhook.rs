//! HandlePaymentWebhookHandler - Command handler for processor webhooks.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{
    AdminEvent, PaymentIntentId, PaymentIntentSnapshot, PaymentOutcome, ProcessorEvent,
    WebhookError, WebhookVerifier,
};
use crate::ports::AdminBroadcaster;

/// Command to handle a webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlePaymentWebhookResult {
    /// `payment_intent.succeeded` relayed to admins.
    PaymentConfirmed { payment_intent_id: PaymentIntentId },
    /// `payment_intent.payment_failed` relayed to admins.
    PaymentFailed { payment_intent_id: PaymentIntentId },
    /// Any other type. Acknowledged, nothing done.
    Ignored { event_type: String },
}

/// Handler for processor webhooks.
///
/// Deliveries are not deduplicated: a redelivered event is broadcast again.
pub struct HandlePaymentWebhookHandler {
    verifier: Arc<WebhookVerifier>,
    broadcaster: Arc<dyn AdminBroadcaster>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(verifier: Arc<WebhookVerifier>, broadcaster: Arc<dyn AdminBroadcaster>) -> Self {
        Self {
            verifier,
            broadcaster,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        let event = self
            .verifier
            .verify(&cmd.payload, cmd.signature.as_deref())
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook rejected");
                e
            })?;

        match event {
            ProcessorEvent::PaymentIntentSucceeded(snapshot) => {
                tracing::info!(
                    payment_intent_id = %snapshot.id,
                    amount = snapshot.amount.value(),
                    "PaymentIntent succeeded"
                );
                let payment_intent_id = snapshot.id.clone();
                self.broadcaster
                    .broadcast(AdminEvent::PaymentWebhookConfirmed(outcome(snapshot)))
                    .await;
                Ok(HandlePaymentWebhookResult::PaymentConfirmed { payment_intent_id })
            }
            ProcessorEvent::PaymentIntentFailed(snapshot) => {
                tracing::warn!(payment_intent_id = %snapshot.id, "PaymentIntent failed");
                let payment_intent_id = snapshot.id.clone();
                self.broadcaster
                    .broadcast(AdminEvent::PaymentFailed(outcome(snapshot)))
                    .await;
                Ok(HandlePaymentWebhookResult::PaymentFailed { payment_intent_id })
            }
            ProcessorEvent::Other { event_type } => {
                tracing::debug!(event_type = %event_type, "Unhandled webhook event type");
                Ok(HandlePaymentWebhookResult::Ignored { event_type })
            }
        }
    }
}

fn outcome(snapshot: PaymentIntentSnapshot) -> PaymentOutcome {
    PaymentOutcome {
        amount: snapshot.amount.to_major(),
        payment_intent_id: snapshot.id,
        currency: snapshot.currency,
        metadata: snapshot.metadata,
        timestamp: Timestamp::now(),
    }
}
