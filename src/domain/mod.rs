//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, auth, field errors)
//! - `payment` - Amounts, intents, validation, admin events, webhook verification
//! - `dashboard` - Admin dashboard read model

pub mod dashboard;
pub mod foundation;
pub mod payment;
