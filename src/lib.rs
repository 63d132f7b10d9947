//! AutoCare Pro Payments - payment processing backend.
//!
//! Wraps the Stripe payment intents API for the AutoCare Pro web client,
//! verifies processor webhooks, and relays payment lifecycle events to
//! connected administrator sessions over WebSocket.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
