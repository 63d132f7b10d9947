//! HTTP adapter for payment endpoints.
//!
//! Exposes create/confirm/config for signed-in users and the unauthenticated
//! processor webhook.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ApiResponse, ConfirmPaymentRequest, CreatePaymentIntentRequest, ErrorResponse,
    PaymentConfigResponse, PaymentConfirmedResponse, PaymentIntentCreatedResponse, WebhookAck,
};
pub use handlers::{PaymentsApiError, PaymentsAppState, WebhookRejection, SIGNATURE_HEADER};
pub use routes::payments_router;
