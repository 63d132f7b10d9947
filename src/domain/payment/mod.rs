//! Payment domain.
//!
//! Value objects for amounts and currencies, processor intent snapshots,
//! request validation, admin lifecycle events, and webhook verification.

mod amount;
mod currency;
mod errors;
mod events;
mod intent;
pub mod processor_event;
mod validation;
pub mod webhook_errors;
pub mod webhook_verifier;

pub use amount::{AmountError, MinorAmount, MINOR_UNITS_PER_MAJOR};
pub use currency::Currency;
pub use errors::{GatewayError, GatewayErrorCode, PaymentError};
pub use events::{AdminEvent, PaymentActivity, PaymentOutcome};
pub use intent::{
    NewPaymentIntent, PaymentIntent, PaymentIntentId, PaymentIntentStatus, PaymentMetadata,
    RequesterIdentity,
};
pub use processor_event::{PaymentIntentSnapshot, ProcessorEvent, StripeEvent, StripeEventType};
pub use validation::{
    validate_create_intent, validate_payment_intent_id, ValidatedIntentRequest,
    DEFAULT_DESCRIPTION,
};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{SignatureHeader, VerificationPolicy, WebhookVerifier};
