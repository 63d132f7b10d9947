//! Payment handlers.
//!
//! Command and query handlers for the payment endpoints and the processor
//! webhook.

mod confirm_payment;
mod create_payment_intent;
mod get_payment_config;
mod handle_payment_webhook;

pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult};
pub use create_payment_intent::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
};
pub use get_payment_config::{GetPaymentConfigHandler, PaymentConfigView};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
