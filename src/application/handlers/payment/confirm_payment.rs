//! ConfirmPaymentHandler - Command handler for client-side payment confirmation.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{
    validate_payment_intent_id, AdminEvent, PaymentActivity, PaymentError, PaymentIntentId,
    PaymentIntentStatus, RequesterIdentity,
};
use crate::ports::{AdminBroadcaster, PaymentGateway};

/// Command to confirm a payment after the client finished checkout.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    /// Raw `paymentIntentId` from the body.
    pub payment_intent_id: Option<Value>,
    pub requester: RequesterIdentity,
}

/// Result of confirming a payment.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmPaymentResult {
    /// The processor reports the payment succeeded.
    Confirmed {
        payment_intent_id: PaymentIntentId,
        /// Major units.
        amount: f64,
        currency: String,
        status: PaymentIntentStatus,
    },
    /// Any other status. Not an error, the client may retry later.
    NotCompleted { status: PaymentIntentStatus },
}

/// Handler for confirming payments.
///
/// Reads the intent back from the processor. Only a `succeeded` intent is
/// reported to admins.
pub struct ConfirmPaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
    broadcaster: Arc<dyn AdminBroadcaster>,
}

impl ConfirmPaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, broadcaster: Arc<dyn AdminBroadcaster>) -> Self {
        Self {
            gateway,
            broadcaster,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmPaymentCommand,
    ) -> Result<ConfirmPaymentResult, PaymentError> {
        let id = validate_payment_intent_id(cmd.payment_intent_id.as_ref())
            .map_err(PaymentError::Validation)?;

        let intent = self.gateway.retrieve_payment_intent(&id).await.map_err(|e| {
            tracing::error!(error = %e, payment_intent_id = %id, "Error confirming payment");
            e
        })?;

        if !intent.status.is_succeeded() {
            tracing::info!(
                payment_intent_id = %intent.id,
                status = intent.status.as_str(),
                "Payment not completed"
            );
            return Ok(ConfirmPaymentResult::NotCompleted {
                status: intent.status,
            });
        }

        let amount = intent.amount.to_major();
        let currency = intent.currency.to_string();

        tracing::info!(
            payment_intent_id = %intent.id,
            amount = intent.amount.value(),
            currency = %currency,
            user_id = %cmd.requester.user_id,
            "Payment confirmed"
        );

        self.broadcaster
            .broadcast(AdminEvent::PaymentCompleted(PaymentActivity {
                user_id: cmd.requester.user_id,
                user_name: cmd.requester.name,
                amount,
                currency: currency.clone(),
                payment_intent_id: intent.id.clone(),
                timestamp: Timestamp::now(),
            }))
            .await;

        Ok(ConfirmPaymentResult::Confirmed {
            payment_intent_id: intent.id,
            amount,
            currency,
            status: intent.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentGateway;
    use crate::adapters::websocket::RecordingBroadcaster;
    use crate::domain::foundation::UserId;
    use crate::domain::payment::{GatewayError, GatewayErrorCode};
    use serde_json::json;

    fn requester() -> RequesterIdentity {
        RequesterIdentity::new(UserId::new("user-7").unwrap(), "Sam", "sam@example.com")
    }

    fn command(id: Value) -> ConfirmPaymentCommand {
        ConfirmPaymentCommand {
            payment_intent_id: Some(id),
            requester: requester(),
        }
    }

    fn setup() -> (ConfirmPaymentHandler, MockPaymentGateway, RecordingBroadcaster) {
        let gateway = MockPaymentGateway::new();
        let broadcaster = RecordingBroadcaster::new();
        let handler =
            ConfirmPaymentHandler::new(Arc::new(gateway.clone()), Arc::new(broadcaster.clone()));
        (handler, gateway, broadcaster)
    }

    #[tokio::test]
    async fn succeeded_intent_is_confirmed_in_major_units() {
        let (handler, gateway, _) = setup();
        gateway.add_intent(MockPaymentGateway::intent(
            "pi_1",
            4999,
            PaymentIntentStatus::Succeeded,
        ));

        let result = handler.handle(command(json!("pi_1"))).await.unwrap();

        assert_eq!(
            result,
            ConfirmPaymentResult::Confirmed {
                payment_intent_id: PaymentIntentId::new("pi_1").unwrap(),
                amount: 49.99,
                currency: "usd".to_string(),
                status: PaymentIntentStatus::Succeeded,
            }
        );
    }

    #[tokio::test]
    async fn succeeded_intent_broadcasts_exactly_once() {
        let (handler, gateway, broadcaster) = setup();
        gateway.add_intent(MockPaymentGateway::intent(
            "pi_1",
            15000,
            PaymentIntentStatus::Succeeded,
        ));

        handler.handle(command(json!("pi_1"))).await.unwrap();

        let events = broadcaster.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "payment-completed");
        assert_eq!(events[0].payment_intent_id().as_str(), "pi_1");
        assert_eq!(events[0].amount(), 150.0);
        match &events[0] {
            AdminEvent::PaymentCompleted(activity) => {
                assert_eq!(activity.user_id.as_str(), "user-7");
                assert_eq!(activity.user_name, "Sam");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn other_status_is_not_completed_without_broadcast() {
        let (handler, gateway, broadcaster) = setup();
        gateway.add_intent(MockPaymentGateway::intent(
            "pi_1",
            4999,
            PaymentIntentStatus::RequiresAction,
        ));

        let result = handler.handle(command(json!("pi_1"))).await.unwrap();

        assert_eq!(
            result,
            ConfirmPaymentResult::NotCompleted {
                status: PaymentIntentStatus::RequiresAction
            }
        );
        assert_eq!(broadcaster.count(), 0);
    }

    #[tokio::test]
    async fn unknown_status_is_echoed() {
        let (handler, gateway, _) = setup();
        gateway.add_intent(MockPaymentGateway::intent(
            "pi_1",
            100,
            PaymentIntentStatus::Other("on_hold".to_string()),
        ));

        let result = handler.handle(command(json!("pi_1"))).await.unwrap();

        match result {
            ConfirmPaymentResult::NotCompleted { status } => assert_eq!(status.as_str(), "on_hold"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_id_is_validation_error() {
        let (handler, gateway, _) = setup();

        let result = handler.handle(command(json!(""))).await;

        assert!(matches!(result, Err(PaymentError::Validation(_))));
        assert!(!gateway.was_called("retrieve_payment_intent"));
    }

    #[tokio::test]
    async fn missing_id_is_validation_error() {
        let (handler, _, _) = setup();

        let cmd = ConfirmPaymentCommand {
            payment_intent_id: None,
            requester: requester(),
        };

        assert!(matches!(
            handler.handle(cmd).await,
            Err(PaymentError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn unknown_intent_is_gateway_error() {
        let (handler, _, broadcaster) = setup();

        let result = handler.handle(command(json!("pi_missing"))).await;

        match result {
            Err(PaymentError::Gateway(e)) => assert_eq!(e.code, GatewayErrorCode::NotFound),
            other => panic!("expected gateway error, got {:?}", other),
        }
        assert_eq!(broadcaster.count(), 0);
    }

    #[tokio::test]
    async fn network_failure_is_gateway_error() {
        let (handler, gateway, _) = setup();
        gateway.add_intent(MockPaymentGateway::intent(
            "pi_1",
            100,
            PaymentIntentStatus::Succeeded,
        ));
        gateway.set_method_error("retrieve_payment_intent", GatewayError::network("timeout"));

        let result = handler.handle(command(json!("pi_1"))).await;

        assert!(matches!(result, Err(PaymentError::Gateway(_))));
    }
}
