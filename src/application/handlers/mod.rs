//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod payment;

pub use payment::{
    ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult,
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
    GetPaymentConfigHandler, HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
    HandlePaymentWebhookResult, PaymentConfigView,
};
