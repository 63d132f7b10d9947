//! Stripe payment gateway adapter.
//!
//! Implements the `PaymentGateway` port against the Stripe payment intents
//! API. Secrets are handled via `secrecy::SecretString`.
//!
//! Webhook signature verification lives in the payment domain, since it
//! needs no network access.

mod api_types;
mod mock_payment_gateway;
mod stripe_adapter;

pub use api_types::{StripeApiError, StripeErrorResponse, StripePaymentIntent};
pub use mock_payment_gateway::{MethodCall, MockPaymentGateway};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
