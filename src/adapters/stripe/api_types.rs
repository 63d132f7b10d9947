//! Stripe API response shapes.
//!
//! Only the fields this service reads are captured; everything else in the
//! response is ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A `payment_intent` object as returned by the Stripe API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePaymentIntent {
    /// Payment intent ID (pi_xxx format).
    pub id: String,

    /// Amount in minor units.
    pub amount: i64,

    /// Lower-case ISO currency code.
    pub currency: String,

    /// Lifecycle status, e.g. `requires_payment_method` or `succeeded`.
    pub status: String,

    /// Secret handed to the browser. Present on create, and on retrieve
    /// only when called with a publishable key.
    #[serde(default)]
    pub client_secret: Option<String>,

    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Error class, e.g. `invalid_request_error` or `card_error`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Machine-readable code, e.g. `resource_missing`.
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}
