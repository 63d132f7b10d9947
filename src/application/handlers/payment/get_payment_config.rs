//! GetPaymentConfigHandler - Query handler for client-side processor config.

/// Config the browser needs to initialise the processor SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfigView {
    pub publishable_key: String,
}

/// Serves the publishable key. Read-only, fixed at startup.
#[derive(Debug, Clone)]
pub struct GetPaymentConfigHandler {
    publishable_key: String,
}

impl GetPaymentConfigHandler {
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
        }
    }

    pub fn handle(&self) -> PaymentConfigView {
        PaymentConfigView {
            publishable_key: self.publishable_key.clone(),
        }
    }
}
