//! WebSocket upgrade handler for admin live connections.
//!
//! Connection lifecycle:
//! 1. Authenticate the caller (query token or bearer header) and require admin
//! 2. Upgrade to WebSocket
//! 3. Join the admin broadcast group
//! 4. Forward events and answer pings until disconnect
//! 5. Leave the group

use std::sync::Arc;

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::{broadcast::error::RecvError, mpsc};

use crate::adapters::http::middleware::{bearer_token, AuthRejection};
use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::ports::SessionValidator;

use super::{
    messages::{reply_to_client_text, ConnectedMessage, ServerMessage},
    rooms::{BroadcastGroup, ClientId, SubscriberRegistry},
};

/// Replies queued by the receive loop for the send loop.
const REPLY_BUFFER: usize = 16;

/// State required for the admin live endpoint.
#[derive(Clone)]
pub struct AdminSocketState {
    pub registry: Arc<SubscriberRegistry>,
    pub validator: Arc<dyn SessionValidator>,
}

impl AdminSocketState {
    pub fn new(registry: Arc<SubscriberRegistry>, validator: Arc<dyn SessionValidator>) -> Self {
        Self {
            registry,
            validator,
        }
    }
}

/// Query parameters accepted on upgrade.
///
/// Browsers cannot set headers on a WebSocket handshake, so the token may
/// travel in the query string instead.
#[derive(Debug, Default, Deserialize)]
pub struct LiveQuery {
    pub token: Option<String>,
}

/// Handle WebSocket upgrade requests for admin sessions.
///
/// Route: `GET /api/v1/admin/live`
///
/// Authentication runs before the upgrade is inspected, so a bad token is
/// reported as 401/403 even for a plain HTTP request.
pub async fn admin_live_handler(
    State(state): State<AdminSocketState>,
    Query(query): Query<LiveQuery>,
    headers: HeaderMap,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let user = match authenticate(&state, query.token.as_deref(), &headers).await {
        Ok(user) => user,
        Err(rejection) => return rejection.into_response(),
    };

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };

    tracing::info!(user_id = %user.id, "Admin live session opening");

    let registry = state.registry.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, user, registry))
}

async fn authenticate(
    state: &AdminSocketState,
    query_token: Option<&str>,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, AuthRejection> {
    let token = query_token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| bearer_token(headers))
        .ok_or(AuthRejection::Unauthenticated)?;

    let user = state.validator.validate(token).await.map_err(|e| {
        tracing::debug!(error = %e, "Rejected admin live token");
        AuthRejection::InvalidToken(e)
    })?;

    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, "Non-admin attempted to join admin live channel");
        return Err(AuthRejection::Forbidden);
    }

    Ok(user)
}

/// Handle an established admin connection.
async fn handle_socket(socket: WebSocket, user: AuthenticatedUser, registry: Arc<SubscriberRegistry>) {
    let (mut sender, mut receiver) = socket.split();

    let client_id = ClientId::new();
    let group = BroadcastGroup::admin();
    let mut events = registry.join(&group, client_id.clone()).await;

    let connected = ServerMessage::Connected(ConnectedMessage {
        client_id: client_id.to_string(),
        group: group.to_string(),
        timestamp: Timestamp::now().to_rfc3339(),
    });

    if let Err(e) = send_message(&mut sender, &connected).await {
        tracing::debug!(client_id = %client_id, "Failed to send connected message: {}", e);
        drop(events);
        registry.leave(&client_id).await;
        return;
    }

    let (reply_tx, mut reply_rx) = mpsc::channel::<ServerMessage>(REPLY_BUFFER);

    let mut send_task = {
        let client_id = client_id.clone();
        tokio::spawn(async move {
            loop {
                let msg = tokio::select! {
                    received = events.recv() => match received {
                        Ok(event) => ServerMessage::Event(event.into()),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(
                                client_id = %client_id,
                                skipped,
                                "Admin session lagged, events dropped"
                            );
                            continue;
                        }
                        Err(RecvError::Closed) => break,
                    },
                    Some(reply) = reply_rx.recv() => reply,
                };

                if let Err(e) = send_message(&mut sender, &msg).await {
                    tracing::debug!(client_id = %client_id, "Send error, closing connection: {}", e);
                    break;
                }
            }
        })
    };

    let mut recv_task = {
        let client_id = client_id.clone();
        tokio::spawn(async move {
            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        if let Some(reply) = reply_to_client_text(&text) {
                            if reply_tx.send(reply).await.is_err() {
                                break;
                            }
                        }
                    }
                    Ok(Message::Binary(_)) => {
                        tracing::warn!(client_id = %client_id, "Received unsupported binary message");
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!(client_id = %client_id, "Client sent close frame");
                        break;
                    }
                    // Protocol ping/pong is answered by axum
                    Ok(_) => {}
                    Err(e) => {
                        tracing::debug!(client_id = %client_id, "Receive error: {}", e);
                        break;
                    }
                }
            }
        })
    };

    // The broadcast receiver lives in the send task, so both tasks must be
    // finished before leaving or the group would never be dropped.
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
    }

    registry.leave(&client_id).await;
    tracing::info!(user_id = %user.id, client_id = %client_id, "Admin live session closed");
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}

/// Router for the admin live endpoint, to be nested under `/api/v1`.
pub fn admin_live_router() -> axum::Router<AdminSocketState> {
    use axum::routing::get;

    axum::Router::new().route("/admin/live", get(admin_live_handler))
}
