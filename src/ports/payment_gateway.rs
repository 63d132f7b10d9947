//! Payment gateway port for the external payment processor.
//!
//! The processor owns payment intents. This service creates them and reads
//! them back; it never mutates one after creation.

use async_trait::async_trait;

use crate::domain::payment::{GatewayError, NewPaymentIntent, PaymentIntent, PaymentIntentId};

/// Port for payment-intent operations on the processor.
///
/// No retries happen behind this trait; every call maps to exactly one
/// processor request.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent.
    ///
    /// The returned intent carries the client secret the browser needs to
    /// complete payment.
    async fn create_payment_intent(
        &self,
        request: &NewPaymentIntent,
    ) -> Result<PaymentIntent, GatewayError>;

    /// Fetch the current state of an intent.
    async fn retrieve_payment_intent(
        &self,
        id: &PaymentIntentId,
    ) -> Result<PaymentIntent, GatewayError>;
}
