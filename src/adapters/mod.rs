//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session validators (JWT, mock)
//! - `http` - Axum router, middleware, payment endpoints
//! - `stripe` - Payment gateway (Stripe, mock)
//! - `websocket` - Admin live channel and subscriber registry

pub mod auth;
pub mod http;
pub mod stripe;
pub mod websocket;
