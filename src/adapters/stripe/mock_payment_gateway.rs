//! Mock payment gateway for testing.
//!
//! Provides a configurable in-memory implementation of `PaymentGateway` for
//! unit and integration tests. Supports:
//! - Pre-seeded intents
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::payment::{
    GatewayError, GatewayErrorCode, MinorAmount, NewPaymentIntent, PaymentIntent,
    PaymentIntentId, PaymentIntentStatus, PaymentMetadata,
};
use crate::ports::PaymentGateway;

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::new();
/// mock.add_intent(MockPaymentGateway::intent("pi_1", 4999, PaymentIntentStatus::Succeeded));
/// mock.set_error(GatewayError::network("timeout"));
/// ```
#[derive(Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Known intents by id.
    intents: HashMap<String, PaymentIntent>,

    /// Every create request received, in order.
    created: Vec<NewPaymentIntent>,

    /// Error to return on next call.
    next_error: Option<GatewayError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, GatewayError>,

    call_log: Vec<MethodCall>,

    sequence: u64,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an intent snapshot for seeding.
    pub fn intent(id: &str, amount: i64, status: PaymentIntentStatus) -> PaymentIntent {
        PaymentIntent {
            id: PaymentIntentId::new(id).expect("mock intent id"),
            amount: MinorAmount::new(amount),
            currency: Default::default(),
            status,
            client_secret: None,
            metadata: PaymentMetadata::new(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Add an intent to the "processor".
    pub fn add_intent(&self, intent: PaymentIntent) {
        let id = intent.id.as_str().to_string();
        self.inner.lock().unwrap().intents.insert(id, intent);
    }

    /// Change the status of a known intent, as the processor would.
    pub fn set_status(&self, id: &str, status: PaymentIntentStatus) {
        if let Some(intent) = self.inner.lock().unwrap().intents.get_mut(id) {
            intent.status = status;
        }
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: GatewayError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: GatewayError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Every create request received, in order.
    pub fn created_requests(&self) -> Vec<NewPaymentIntent> {
        self.inner.lock().unwrap().created.clone()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), GatewayError> {
        let mut state = self.inner.lock().unwrap();

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentGateway {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_payment_intent(
        &self,
        request: &NewPaymentIntent,
    ) -> Result<PaymentIntent, GatewayError> {
        self.record_call(
            "create_payment_intent",
            vec![request.amount.to_string(), request.currency.to_string()],
        );
        self.check_error("create_payment_intent")?;

        let mut state = self.inner.lock().unwrap();
        state.sequence += 1;
        let id = format!("pi_mock_{}", state.sequence);

        let intent = PaymentIntent {
            id: PaymentIntentId::new(id.clone())
                .map_err(|e| GatewayError::unexpected_response(e.to_string()))?,
            amount: request.amount,
            currency: request.currency.clone(),
            status: PaymentIntentStatus::RequiresPaymentMethod,
            client_secret: Some(format!("{}_secret_mock", id)),
            metadata: request.metadata.clone(),
        };

        state.created.push(request.clone());
        state.intents.insert(id, intent.clone());

        Ok(intent)
    }

    async fn retrieve_payment_intent(
        &self,
        id: &PaymentIntentId,
    ) -> Result<PaymentIntent, GatewayError> {
        self.record_call("retrieve_payment_intent", vec![id.to_string()]);
        self.check_error("retrieve_payment_intent")?;

        let state = self.inner.lock().unwrap();
        let mut intent = state.intents.get(id.as_str()).cloned().ok_or_else(|| {
            GatewayError::new(
                GatewayErrorCode::NotFound,
                format!("No such payment_intent: '{}'", id),
            )
            .with_provider_code("resource_missing")
        })?;
        intent.client_secret = None;
        Ok(intent)
    }
}
