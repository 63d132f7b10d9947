//! Axum router configuration for payment endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::{auth_middleware, AuthState};

use super::handlers::{
    confirm_payment, create_payment_intent, get_config, handle_webhook, PaymentsAppState,
};

/// Create the payments API router, to be nested at `/api/v1/payments`.
///
/// # Routes
///
/// ## User Endpoints (require authentication)
/// - `POST /create-payment-intent` - Create an intent, returns client secret
/// - `POST /confirm-payment` - Read back and confirm an intent
/// - `GET /config` - Publishable key for the browser SDK
///
/// ## Webhook Endpoint (no auth, signature verified)
/// - `POST /webhook` - Processor notifications
pub fn payments_router(auth: AuthState) -> Router<PaymentsAppState> {
    let authenticated = Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/confirm-payment", post(confirm_payment))
        .route("/config", get(get_config))
        .route_layer(middleware::from_fn_with_state(auth, auth_middleware));

    Router::new()
        .merge(authenticated)
        .route("/webhook", post(handle_webhook))
}
