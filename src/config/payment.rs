//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::payment::VerificationPolicy;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (`sk_...`)
    pub stripe_secret_key: SecretString,

    /// Stripe publishable key (`pk_...`), served to the browser
    pub stripe_publishable_key: String,

    /// Stripe webhook signing secret (`whsec_...`). Without it webhooks are
    /// accepted unverified, which is refused in production.
    pub stripe_webhook_secret: Option<SecretString>,

    /// Override for the Stripe API base URL
    pub stripe_api_base: Option<String>,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_secret_key.expose_secret().starts_with("sk_live_")
    }

    /// Webhook secret, ignoring a blank value.
    fn webhook_secret(&self) -> Option<&SecretString> {
        self.stripe_webhook_secret
            .as_ref()
            .filter(|s| !s.expose_secret().trim().is_empty())
    }

    /// Webhook verification policy, fixed for the life of the process.
    pub fn verification_policy(&self) -> VerificationPolicy {
        match self.webhook_secret() {
            Some(secret) => VerificationPolicy::Enforced(secret.clone()),
            None => VerificationPolicy::Disabled,
        }
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret_key = self.stripe_secret_key.expose_secret();
        if secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"));
        }
        if self.stripe_publishable_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_PUBLISHABLE_KEY"));
        }

        // Verify key prefixes for safety
        if !secret_key.starts_with("sk_") && !secret_key.starts_with("rk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_publishable_key.starts_with("pk_") {
            return Err(ValidationError::InvalidPublishableKey);
        }

        match self.webhook_secret() {
            Some(secret) if !secret.expose_secret().starts_with("whsec_") => {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
            None if *environment == Environment::Production => {
                return Err(ValidationError::WebhookSecretRequired);
            }
            _ => {}
        }

        if *environment == Environment::Production {
            if let Some(base) = &self.stripe_api_base {
                if !base.starts_with("https://") {
                    return Err(ValidationError::ApiBaseMustBeHttps);
                }
            }
        }

        Ok(())
    }
}
