//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `PaymentGateway` - Payment processor (Stripe)
//! - `AdminBroadcaster` - Fan-out to connected admin sessions
//! - `SessionValidator` - Bearer token validation
//! - `RequestStatusUpdater` - External service-request store

mod admin_broadcaster;
mod payment_gateway;
mod request_status_updater;
mod session_validator;

pub use admin_broadcaster::AdminBroadcaster;
pub use payment_gateway::PaymentGateway;
pub use request_status_updater::{RequestStatusUpdater, StatusUpdateError};
pub use session_validator::SessionValidator;
