//! Request/response DTOs for payment endpoints.
//!
//! Every JSON response uses the `{success, message?, data?, errors?}`
//! envelope the web client already understands.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::application::handlers::payment::{
    ConfirmPaymentResult, CreatePaymentIntentResult, PaymentConfigView,
};
use crate::domain::foundation::FieldError;
use crate::domain::payment::PaymentIntentStatus;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /create-payment-intent`.
///
/// Fields stay as raw JSON so validation can report the rejected value. An
/// explicit `null` is kept as `Some(Value::Null)`, distinct from absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentIntentRequest {
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub currency: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
}

/// Body of `POST /confirm-payment`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    #[serde(default, deserialize_with = "present")]
    pub payment_intent_id: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Success envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn ok_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Failure envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    /// Processor status, for a payment that has not completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentIntentStatus>,
}

impl ErrorResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            errors: None,
            status: None,
        }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: None,
            errors: Some(errors),
            status: None,
        }
    }

    pub fn not_completed(status: PaymentIntentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::message("Payment not completed")
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentCreatedResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}

impl From<CreatePaymentIntentResult> for PaymentIntentCreatedResponse {
    fn from(result: CreatePaymentIntentResult) -> Self {
        Self {
            client_secret: result.client_secret,
            payment_intent_id: result.payment_intent_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmedResponse {
    pub payment_intent_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentIntentStatus,
}

impl PaymentConfirmedResponse {
    /// Hands back the status of a payment that has not completed.
    pub fn from_result(result: ConfirmPaymentResult) -> Result<Self, PaymentIntentStatus> {
        match result {
            ConfirmPaymentResult::Confirmed {
                payment_intent_id,
                amount,
                currency,
                status,
            } => Ok(Self {
                payment_intent_id: payment_intent_id.to_string(),
                amount,
                currency,
                status,
            }),
            ConfirmPaymentResult::NotCompleted { status } => Err(status),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfigResponse {
    pub publishable_key: String,
}

impl From<PaymentConfigView> for PaymentConfigResponse {
    fn from(view: PaymentConfigView) -> Self {
        Self {
            publishable_key: view.publishable_key,
        }
    }
}

/// Webhook acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}
