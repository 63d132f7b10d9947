//! Validation error types shared across the domain.

use serde::Serialize;
use thiserror::Error;

/// Validation failure on a single domain value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// One entry of the `errors` array returned for a rejected request body.
///
/// Serialized as `{type: "field", path, msg, location: "body", value?}` so
/// existing frontend code keyed on those names keeps working.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// Name of the offending field.
    pub path: String,

    /// Human-readable message.
    pub msg: String,

    pub location: &'static str,

    /// Value that was rejected, if one was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl FieldError {
    /// Creates a body field error.
    pub fn new(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            kind: "field",
            path: path.into(),
            msg: msg.into(),
            location: "body",
            value: None,
        }
    }

    /// Attaches the rejected value.
    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.msg)
    }
}
