//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::payment::{
    ConfirmPaymentCommand, ConfirmPaymentHandler, CreatePaymentIntentCommand,
    CreatePaymentIntentHandler, GetPaymentConfigHandler, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler,
};
use crate::domain::payment::{PaymentError, RequesterIdentity, WebhookError, WebhookVerifier};
use crate::ports::{AdminBroadcaster, PaymentGateway};

use super::dto::{
    ApiResponse, ConfirmPaymentRequest, CreatePaymentIntentRequest, ErrorResponse,
    PaymentConfigResponse, PaymentConfirmedResponse, PaymentIntentCreatedResponse, WebhookAck,
};

/// Header carrying the processor's webhook signature.
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the payment endpoints.
#[derive(Clone)]
pub struct PaymentsAppState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub broadcaster: Arc<dyn AdminBroadcaster>,
    pub verifier: Arc<WebhookVerifier>,
    pub publishable_key: String,
}

impl PaymentsAppState {
    pub fn create_payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(self.gateway.clone(), self.broadcaster.clone())
    }

    pub fn confirm_payment_handler(&self) -> ConfirmPaymentHandler {
        ConfirmPaymentHandler::new(self.gateway.clone(), self.broadcaster.clone())
    }

    pub fn config_handler(&self) -> GetPaymentConfigHandler {
        GetPaymentConfigHandler::new(self.publishable_key.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.verifier.clone(), self.broadcaster.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Authenticated Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/payments/create-payment-intent
pub async fn create_payment_intent(
    State(state): State<PaymentsAppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let Json(body) = body?;

    let cmd = CreatePaymentIntentCommand {
        amount: body.amount,
        currency: body.currency,
        description: body.description,
        requester: RequesterIdentity::from(&user),
    };

    let result = state
        .create_payment_intent_handler()
        .handle(cmd)
        .await
        .map_err(|e| PaymentsApiError::from_payment_error(e, "Error creating payment intent"))?;

    Ok(Json(ApiResponse::ok(PaymentIntentCreatedResponse::from(result))))
}

/// POST /api/v1/payments/confirm-payment
pub async fn confirm_payment(
    State(state): State<PaymentsAppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<ConfirmPaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let Json(body) = body?;

    let cmd = ConfirmPaymentCommand {
        payment_intent_id: body.payment_intent_id,
        requester: RequesterIdentity::from(&user),
    };

    let result = state
        .confirm_payment_handler()
        .handle(cmd)
        .await
        .map_err(|e| PaymentsApiError::from_payment_error(e, "Error confirming payment"))?;

    match PaymentConfirmedResponse::from_result(result) {
        Ok(confirmed) => Ok(Json(ApiResponse::ok_with_message(
            "Payment confirmed successfully",
            confirmed,
        ))),
        Err(status) => Err(PaymentsApiError::Rejected(ErrorResponse::not_completed(status))),
    }
}

/// GET /api/v1/payments/config
pub async fn get_config(
    State(state): State<PaymentsAppState>,
    RequireAuth(_user): RequireAuth,
) -> impl IntoResponse {
    let view = state.config_handler().handle();
    Json(ApiResponse::ok(PaymentConfigResponse::from(view)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhook Endpoint (no auth, signature verified)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/payments/webhook
///
/// Takes the raw body: the signature covers the exact bytes sent.
pub async fn handle_webhook(
    State(state): State<PaymentsAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookRejection> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    state.webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookAck { received: true }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts payment errors to HTTP responses.
#[derive(Debug)]
pub enum PaymentsApiError {
    /// 400 with a prepared envelope.
    Rejected(ErrorResponse),
    /// 500 with a fixed message; the cause is logged by the handler.
    Internal(&'static str),
}

impl PaymentsApiError {
    /// Gateway failures collapse to `message`, so no processor detail leaks.
    pub fn from_payment_error(err: PaymentError, message: &'static str) -> Self {
        match err {
            PaymentError::Validation(errors) => Self::Rejected(ErrorResponse::validation(errors)),
            PaymentError::Gateway(_) => Self::Internal(message),
        }
    }
}

impl From<JsonRejection> for PaymentsApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        Self::Rejected(ErrorResponse::message("Invalid JSON body"))
    }
}

impl IntoResponse for PaymentsApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected(body) => (StatusCode::BAD_REQUEST, Json(body)).into_response(),
            Self::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::message(message)),
            )
                .into_response(),
        }
    }
}

/// Webhook failures are plain text, as the processor dashboard shows them verbatim.
#[derive(Debug)]
pub struct WebhookRejection(WebhookError);

impl From<WebhookError> for WebhookRejection {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookRejection {
    fn into_response(self) -> Response {
        (self.0.status_code(), format!("Webhook Error: {}", self.0)).into_response()
    }
}

#[cfg(test)]
#[path = "handlers_test.rs"]
mod tests;
