//! Webhook rejection reasons.

use axum::http::StatusCode;
use thiserror::Error;

/// Reasons a webhook delivery is rejected.
///
/// Every variant is a client error: the processor should not retry a
/// delivery that failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// A secret is configured but the request carried no signature header.
    #[error("No signatures found matching the expected signature for payload")]
    MissingSignature,

    /// No `v1` signature matched the recomputed one.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature timestamp is older than the tolerance window.
    #[error("Timestamp outside the tolerance zone")]
    TimestampOutOfRange,

    /// Signature timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Header or payload could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A handled event lacks a required field.
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

impl WebhookError {
    /// HTTP status for the rejection. Always 400.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_signature_displays_correctly() {
        assert_eq!(WebhookError::InvalidSignature.to_string(), "Invalid signature");
    }

    #[test]
    fn parse_error_displays_message() {
        let err = WebhookError::ParseError("invalid JSON".to_string());
        assert_eq!(err.to_string(), "Parse error: invalid JSON");
    }

    #[test]
    fn missing_field_displays_field_name() {
        assert_eq!(
            WebhookError::MissingField("data.object.id").to_string(),
            "Missing field: data.object.id"
        );
    }

    #[test]
    fn every_rejection_is_bad_request() {
        let errors = [
            WebhookError::MissingSignature,
            WebhookError::InvalidSignature,
            WebhookError::TimestampOutOfRange,
            WebhookError::InvalidTimestamp,
            WebhookError::ParseError("x".to_string()),
            WebhookError::MissingField("id"),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{}", err);
        }
    }
}
