//! Payment intent as seen by this service.
//!
//! Intents are created and mutated by the processor. The service holds
//! snapshots only, so there are no transition methods here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Currency, MinorAmount};
use crate::domain::foundation::{AuthenticatedUser, UserId, ValidationError};

/// Processor-assigned identifier of a payment intent (`pi_...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentIntentId(String);

impl PaymentIntentId {
    /// Creates an id, rejecting blank strings.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("paymentIntentId"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentIntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status reported by the processor.
///
/// Unknown statuses are kept verbatim so they can be echoed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    Failed,
    Other(String),
}

impl PaymentIntentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::RequiresPaymentMethod => "requires_payment_method",
            Self::RequiresConfirmation => "requires_confirmation",
            Self::RequiresAction => "requires_action",
            Self::Processing => "processing",
            Self::RequiresCapture => "requires_capture",
            Self::Canceled => "canceled",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }

    /// Only `succeeded` counts as a completed payment.
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl From<String> for PaymentIntentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "requires_payment_method" => Self::RequiresPaymentMethod,
            "requires_confirmation" => Self::RequiresConfirmation,
            "requires_action" => Self::RequiresAction,
            "processing" => Self::Processing,
            "requires_capture" => Self::RequiresCapture,
            "canceled" => Self::Canceled,
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            _ => Self::Other(s),
        }
    }
}

impl From<PaymentIntentStatus> for String {
    fn from(status: PaymentIntentStatus) -> Self {
        match status {
            PaymentIntentStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processor-side metadata attached to an intent.
pub type PaymentMetadata = BTreeMap<String, String>;

/// Identity of the caller who asked for a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterIdentity {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

impl RequesterIdentity {
    pub fn new(user_id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Metadata entries stored on the intent: `userId`, `userName`, `userEmail`.
    pub fn to_metadata(&self) -> PaymentMetadata {
        let mut metadata = PaymentMetadata::new();
        metadata.insert("userId".to_string(), self.user_id.to_string());
        metadata.insert("userName".to_string(), self.name.clone());
        metadata.insert("userEmail".to_string(), self.email.clone());
        metadata
    }
}

impl From<&AuthenticatedUser> for RequesterIdentity {
    fn from(user: &AuthenticatedUser) -> Self {
        Self::new(user.id.clone(), user.name.clone(), user.email.clone())
    }
}

/// Snapshot of a processor payment intent.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub id: PaymentIntentId,
    pub amount: MinorAmount,
    pub currency: Currency,
    pub status: PaymentIntentStatus,
    /// Present only in the creation response.
    pub client_secret: Option<String>,
    pub metadata: PaymentMetadata,
}

/// Everything the gateway needs to open a new intent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaymentIntent {
    pub amount: MinorAmount,
    pub currency: Currency,
    pub description: String,
    pub metadata: PaymentMetadata,
}
