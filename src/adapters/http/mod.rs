//! HTTP adapters - REST API and router assembly.
//!
//! - `middleware` - Bearer token authentication
//! - `payments` - Payment endpoints and processor webhook

pub mod middleware;
pub mod payments;

use std::time::Duration;

use axum::{routing::get, Router};
use http::{HeaderValue, Method};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::websocket::{admin_live_router, AdminSocketState};

pub use middleware::AuthState;
pub use payments::{payments_router, PaymentsAppState};

/// Cross-cutting settings for the HTTP stack.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub request_timeout: Duration,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Assemble the full application router.
///
/// # Routes
/// - `GET /health` - Liveness probe
/// - `/api/v1/payments/*` - Payment endpoints
/// - `GET /api/v1/admin/live` - Admin WebSocket
pub fn build_router(
    payments: PaymentsAppState,
    admin: AdminSocketState,
    auth: AuthState,
    settings: &RouterSettings,
) -> Router {
    let api = Router::new()
        .nest("/payments", payments_router(auth).with_state(payments))
        .merge(admin_live_router().with_state(admin));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn health() -> &'static str {
    "ok"
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::stripe::MockPaymentGateway;
    use crate::adapters::websocket::SubscriberRegistry;
    use crate::domain::payment::{VerificationPolicy, WebhookVerifier};

    fn app(settings: RouterSettings) -> Router {
        let validator: AuthState =
            Arc::new(MockSessionValidator::new().with_test_user("token", "user-1"));
        let registry = Arc::new(SubscriberRegistry::default());

        let payments = PaymentsAppState {
            gateway: Arc::new(MockPaymentGateway::new()),
            broadcaster: registry.clone(),
            verifier: Arc::new(WebhookVerifier::new(VerificationPolicy::Disabled)),
            publishable_key: "pk_test_router".to_string(),
        };
        let admin = AdminSocketState::new(registry, validator.clone());

        build_router(payments, admin, validator, &settings)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app(RouterSettings::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let response = app(RouterSettings::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn payments_are_mounted_under_api_v1() {
        let response = app(RouterSettings::default())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/payments/config")
                    .header(header::AUTHORIZATION, "Bearer token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_live_is_mounted_under_api_v1() {
        let response = app(RouterSettings::default())
            .oneshot(
                Request::builder()
                    .uri("/api/v1/admin/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = app(RouterSettings::default())
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn configured_cors_origin_is_allowed() {
        let settings = RouterSettings {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };

        let response = app(settings)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }
}
