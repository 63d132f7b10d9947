use std::sync::Arc;

use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use tracing_subscriber::EnvFilter;

use autocare_payments::adapters::auth::JwtSessionValidator;
use autocare_payments::adapters::http::{build_router, AuthState, PaymentsAppState, RouterSettings};
use autocare_payments::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use autocare_payments::adapters::websocket::{AdminSocketState, SubscriberRegistry};
use autocare_payments::config::AppConfig;
use autocare_payments::domain::payment::WebhookVerifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;

    init_tracing(&config);

    config.validate().context("validating configuration")?;

    let addr = config.server.socket_addr()?;

    // Payment gateway
    let mut stripe_config = StripeConfig::new(SecretString::new(
        config.payment.stripe_secret_key.expose_secret().clone(),
    ));
    if let Some(base) = &config.payment.stripe_api_base {
        stripe_config = stripe_config.with_base_url(base.clone());
    }
    let gateway = Arc::new(StripePaymentAdapter::new(stripe_config));

    // Webhook verification, fixed for the life of the process
    let policy = config.payment.verification_policy();
    if policy.is_enforced() {
        tracing::info!("Webhook signature verification enabled");
    } else {
        tracing::warn!(
            "STRIPE_WEBHOOK_SECRET not set, webhook signatures will NOT be verified"
        );
    }
    let verifier = Arc::new(WebhookVerifier::new(policy));

    // Auth
    let mut validator = JwtSessionValidator::new(&config.auth.jwt_secret);
    if let Some(issuer) = &config.auth.jwt_issuer {
        validator = validator.with_issuer(issuer);
    }
    let auth: AuthState = Arc::new(validator);

    // Admin broadcast
    let registry = Arc::new(SubscriberRegistry::new(config.server.broadcast_capacity));

    let payments = PaymentsAppState {
        gateway,
        broadcaster: registry.clone(),
        verifier,
        publishable_key: config.payment.stripe_publishable_key.clone(),
    };
    let admin = AdminSocketState::new(registry, auth.clone());

    let settings = RouterSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.allowed_origins(),
    };
    let app = build_router(payments, admin, auth, &settings);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        "AutoCare Pro payments server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
