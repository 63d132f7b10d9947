//! CreatePaymentIntentHandler - Command handler for starting a payment.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{
    validate_create_intent, AdminEvent, GatewayError, NewPaymentIntent, PaymentActivity,
    PaymentError, PaymentIntentId, RequesterIdentity,
};
use crate::ports::{AdminBroadcaster, PaymentGateway};

/// Command to create a payment intent.
///
/// Fields are the raw JSON values from the request body; `None` means the
/// field was absent.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentCommand {
    pub amount: Option<Value>,
    pub currency: Option<Value>,
    pub description: Option<Value>,
    pub requester: RequesterIdentity,
}

/// What the client needs to finish the payment in the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePaymentIntentResult {
    pub client_secret: String,
    pub payment_intent_id: PaymentIntentId,
}

/// Handler for creating payment intents.
///
/// Validates the body, creates the intent with the requester attached as
/// metadata, then tells connected admins a payment has started.
pub struct CreatePaymentIntentHandler {
    gateway: Arc<dyn PaymentGateway>,
    broadcaster: Arc<dyn AdminBroadcaster>,
}

impl CreatePaymentIntentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, broadcaster: Arc<dyn AdminBroadcaster>) -> Self {
        Self {
            gateway,
            broadcaster,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<CreatePaymentIntentResult, PaymentError> {
        // 1. Validate before touching the processor
        let validated = validate_create_intent(
            cmd.amount.as_ref(),
            cmd.currency.as_ref(),
            cmd.description.as_ref(),
        )
        .map_err(PaymentError::Validation)?;

        // 2. Create the intent
        let request = NewPaymentIntent {
            amount: validated.amount,
            currency: validated.currency.clone(),
            description: validated.description,
            metadata: cmd.requester.to_metadata(),
        };

        let intent = self
            .gateway
            .create_payment_intent(&request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    user_id = %cmd.requester.user_id,
                    "Error creating payment intent"
                );
                e
            })?;

        let client_secret = intent.client_secret.clone().ok_or_else(|| {
            tracing::error!(payment_intent_id = %intent.id, "Created intent has no client secret");
            GatewayError::unexpected_response("payment intent created without client_secret")
        })?;

        tracing::info!(
            payment_intent_id = %intent.id,
            amount = validated.amount.value(),
            currency = %validated.currency,
            user_id = %cmd.requester.user_id,
            "Payment intent created"
        );

        // 3. Notify admins
        self.broadcaster
            .broadcast(AdminEvent::PaymentInitiated(PaymentActivity {
                user_id: cmd.requester.user_id,
                user_name: cmd.requester.name,
                amount: validated.major_amount,
                currency: validated.currency.to_string(),
                payment_intent_id: intent.id.clone(),
                timestamp: Timestamp::now(),
            }))
            .await;

        Ok(CreatePaymentIntentResult {
            client_secret,
            payment_intent_id: intent.id,
        })
    }
}
