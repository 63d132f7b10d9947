//! Stripe payment gateway adapter.
//!
//! Implements `PaymentGateway` against the Stripe REST API: form-encoded
//! requests, basic auth with the secret key, JSON responses.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(secret_key);
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::payment::{
    Currency, GatewayError, GatewayErrorCode, MinorAmount, NewPaymentIntent, PaymentIntent,
    PaymentIntentId, PaymentIntentStatus,
};
use crate::ports::PaymentGateway;

use super::api_types::{StripeErrorResponse, StripePaymentIntent};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Stripe payment gateway adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Uses a preconfigured client (timeouts, proxies).
    pub fn with_client(config: StripeConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.config.api_base_url)
    }

    /// `/v1/payment_intents/{id}` with the id as a single encoded segment.
    fn intent_url(&self, id: &PaymentIntentId) -> Result<reqwest::Url, GatewayError> {
        if matches!(id.as_str(), "." | "..") {
            return Err(GatewayError::new(
                GatewayErrorCode::InvalidRequest,
                format!("Invalid payment intent id '{}'", id),
            ));
        }

        let mut url = reqwest::Url::parse(&self.intents_url()).map_err(|e| {
            GatewayError::new(
                GatewayErrorCode::InvalidRequest,
                format!("Invalid Stripe API base URL: {}", e),
            )
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::new(
                    GatewayErrorCode::InvalidRequest,
                    "Stripe API base URL cannot carry a path",
                )
            })?
            .push(id.as_str());
        Ok(url)
    }

    async fn read_intent(
        &self,
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<PaymentIntent, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = map_error_response(status, &body);
            tracing::error!(
                operation,
                http_status = status.as_u16(),
                code = %error.code,
                provider_code = error.provider_code.as_deref().unwrap_or(""),
                error = %error.message,
                "Stripe request failed"
            );
            return Err(error);
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to parse Stripe response");
            GatewayError::unexpected_response(format!("Failed to parse Stripe response: {}", e))
        })?;

        to_domain_intent(intent)
    }
}

#[async_trait]
impl PaymentGateway for StripePaymentAdapter {
    async fn create_payment_intent(
        &self,
        request: &NewPaymentIntent,
    ) -> Result<PaymentIntent, GatewayError> {
        let response = self
            .http_client
            .post(self.intents_url())
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&create_params(request))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Stripe create_payment_intent unreachable");
                GatewayError::network(e.to_string())
            })?;

        let intent = self.read_intent(response, "create_payment_intent").await?;
        tracing::info!(
            payment_intent_id = %intent.id,
            amount = intent.amount.value(),
            currency = %intent.currency,
            "Payment intent created"
        );
        Ok(intent)
    }

    async fn retrieve_payment_intent(
        &self,
        id: &PaymentIntentId,
    ) -> Result<PaymentIntent, GatewayError> {
        let url = self.intent_url(id)?;

        let response = self
            .http_client
            .get(url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Stripe retrieve_payment_intent unreachable");
                GatewayError::network(e.to_string())
            })?;

        self.read_intent(response, "retrieve_payment_intent").await
    }
}

/// Form parameters for `POST /v1/payment_intents`.
fn create_params(request: &NewPaymentIntent) -> Vec<(String, String)> {
    let mut params = vec![
        ("amount".to_string(), request.amount.value().to_string()),
        ("currency".to_string(), request.currency.as_str().to_string()),
        ("description".to_string(), request.description.clone()),
    ];
    params.extend(
        request
            .metadata
            .iter()
            .map(|(k, v)| (format!("metadata[{}]", k), v.clone())),
    );
    params
}

fn to_domain_intent(intent: StripePaymentIntent) -> Result<PaymentIntent, GatewayError> {
    let id = PaymentIntentId::new(intent.id)
        .map_err(|_| GatewayError::unexpected_response("payment intent without id"))?;
    let currency = Currency::parse(&intent.currency).map_err(|_| {
        GatewayError::unexpected_response(format!("unexpected currency '{}'", intent.currency))
    })?;

    Ok(PaymentIntent {
        id,
        amount: MinorAmount::new(intent.amount),
        currency,
        status: PaymentIntentStatus::from(intent.status),
        client_secret: intent.client_secret,
        metadata: intent.metadata,
    })
}

fn map_error_response(status: reqwest::StatusCode, body: &str) -> GatewayError {
    let code = match status.as_u16() {
        400 => GatewayErrorCode::InvalidRequest,
        401 | 403 => GatewayErrorCode::Authentication,
        402 => GatewayErrorCode::CardDeclined,
        404 => GatewayErrorCode::NotFound,
        429 => GatewayErrorCode::RateLimited,
        _ => GatewayErrorCode::ProviderError,
    };

    match serde_json::from_str::<StripeErrorResponse>(body) {
        Ok(parsed) => {
            let message = parsed
                .error
                .message
                .unwrap_or_else(|| format!("Stripe API error ({})", status));
            let error = GatewayError::new(code, message);
            match parsed.error.code {
                Some(provider_code) => error.with_provider_code(provider_code),
                None => error,
            }
        }
        Err(_) => GatewayError::new(code, format!("Stripe API error ({}): {}", status, body)),
    }
}
