//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication types and the
//! field-level validation error shared by the payment and dashboard modules.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, UserRole};
pub use errors::{FieldError, ValidationError};
pub use ids::{NotificationId, UserId};
pub use timestamp::Timestamp;
