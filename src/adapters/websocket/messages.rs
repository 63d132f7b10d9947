//! WebSocket message types for the admin live channel.
//!
//! Defines the protocol between server and connected admin sessions:
//! - Server → Client: connection status, payment events, errors, pongs
//! - Client → Server: pings

use serde::{Deserialize, Serialize};

use crate::domain::dashboard::AdminNotification;
use crate::domain::foundation::Timestamp;
use crate::domain::payment::AdminEvent;

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established and group joined.
    Connected(ConnectedMessage),

    /// A broadcast admin event.
    Event(AdminEventMessage),

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

/// Sent once the session has joined its group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub client_id: String,
    pub group: String,
    pub timestamp: String,
}

/// An admin event plus the notification derived from it.
///
/// Serializes as `{"event": name, "data": payload, "notification": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct AdminEventMessage {
    #[serde(flatten)]
    pub event: AdminEvent,
    pub notification: AdminNotification,
}

impl From<AdminEvent> for AdminEventMessage {
    fn from(event: AdminEvent) -> Self {
        let notification = AdminNotification::from_event(&event);
        Self {
            event,
            notification,
        }
    }
}

/// Error message sent to client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorMessage {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Timestamp::now().to_rfc3339(),
        }
    }
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Heartbeat request.
    Ping,
}

/// Reply to a text frame from the client, if one is due.
pub fn reply_to_client_text(text: &str) -> Option<ServerMessage> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Ping) => Some(ServerMessage::Pong(PongMessage {
            timestamp: Timestamp::now().to_rfc3339(),
        })),
        Err(_) => Some(ServerMessage::Error(ErrorMessage::new(
            "unsupported_message",
            "Unsupported message",
        ))),
    }
}
