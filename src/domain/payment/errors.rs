//! Payment error types.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::FieldError;

/// Failure of a payment operation.
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    /// The request body was rejected before any processor call.
    #[error("validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// The processor call failed. Details stay server-side.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error from the payment processor.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct GatewayError {
    pub code: GatewayErrorCode,
    pub message: String,
    /// Processor-specific error code, if one was returned.
    pub provider_code: Option<String>,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::UnexpectedResponse, message)
    }
}

/// Broad classes of processor failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorCode {
    /// The processor rejected the request parameters.
    InvalidRequest,
    /// The secret key was rejected.
    Authentication,
    /// Card or payment method declined.
    CardDeclined,
    /// The referenced intent does not exist.
    NotFound,
    /// Processor throttled the request.
    RateLimited,
    /// Transport failure reaching the processor.
    NetworkError,
    /// Response body did not match the expected shape.
    UnexpectedResponse,
    /// Processor-side failure.
    ProviderError,
}

impl fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::CardDeclined => "card_declined",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::NetworkError => "network_error",
            Self::UnexpectedResponse => "unexpected_response",
            Self::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_error_displays_code_and_message() {
        let err = GatewayError::network("connection reset");
        assert_eq!(err.to_string(), "network_error: connection reset");
    }

    #[test]
    fn validation_error_lists_fields() {
        let err = PaymentError::Validation(vec![
            FieldError::new("amount", "Amount must be a number"),
            FieldError::new("currency", "Currency must be 3 characters"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: amount: Amount must be a number; currency: Currency must be 3 characters"
        );
    }

    #[test]
    fn gateway_error_converts_into_payment_error() {
        let err: PaymentError = GatewayError::new(GatewayErrorCode::CardDeclined, "declined")
            .with_provider_code("card_declined")
            .into();
        match err {
            PaymentError::Gateway(inner) => {
                assert_eq!(inner.code, GatewayErrorCode::CardDeclined);
                assert_eq!(inner.provider_code.as_deref(), Some("card_declined"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
