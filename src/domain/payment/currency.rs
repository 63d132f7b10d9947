//! Currency code value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Three-character currency code, stored lower-cased as the processor expects.
///
/// Only the length is checked; the processor rejects codes it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Currency used when a request does not name one.
    pub const DEFAULT: &'static str = "usd";

    /// Parses a currency code, lower-casing it.
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        if code.chars().count() != 3 {
            return Err(ValidationError::invalid_format(
                "currency",
                "must be 3 characters",
            ));
        }
        Ok(Self(code.to_lowercase()))
    }

    /// The default currency (`usd`).
    pub fn usd() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    /// Returns the lower-cased code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
