//! WebSocket adapters for the admin live channel.
//!
//! Payment handlers publish `AdminEvent`s through the `AdminBroadcaster`
//! port. The `SubscriberRegistry` implements that port and fans each event
//! out to the sessions joined to the admin group.
//!
//! ```text
//! payment handlers ──broadcast──▶ SubscriberRegistry
//!                                   group "admin"
//!                                   ├── client-a ──▶ WebSocket
//!                                   └── client-b ──▶ WebSocket
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`rooms`] - Subscriber registry and broadcast groups
//! - [`handler`] - Axum WebSocket upgrade handler
//! - `RecordingBroadcaster` - Test double that captures events

pub mod handler;
pub mod messages;
mod recording;
pub mod rooms;

pub use handler::{admin_live_handler, admin_live_router, AdminSocketState, LiveQuery};
pub use messages::{
    reply_to_client_text, AdminEventMessage, ClientMessage, ConnectedMessage, ErrorMessage,
    PongMessage, ServerMessage,
};
pub use recording::RecordingBroadcaster;
pub use rooms::{BroadcastGroup, ClientId, SubscriberRegistry};
