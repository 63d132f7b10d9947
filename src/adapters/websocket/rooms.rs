//! Subscriber registry for broadcast groups.
//!
//! Sessions join a named group and receive every event broadcast to it.
//! Today the only group is `admin`, joined by administrator dashboards.
//!
//! ```text
//! Group: admin
//! ├── client-a
//! ├── client-b
//! └── client-c
//! ```

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::domain::payment::AdminEvent;
use crate::ports::AdminBroadcaster;

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a broadcast group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BroadcastGroup(String);

impl BroadcastGroup {
    /// Administrator sessions.
    pub fn admin() -> Self {
        Self("admin".to_string())
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BroadcastGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry of subscribed sessions, one bounded channel per group.
///
/// Owned by the process and shared through `Arc`. Broadcasts take a read
/// lock only, so they run concurrently; join and leave take the write lock.
pub struct SubscriberRegistry {
    /// Map of group → broadcast sender for that group.
    groups: RwLock<HashMap<BroadcastGroup, broadcast::Sender<AdminEvent>>>,

    /// Map of client → group for O(1) cleanup on disconnect.
    client_groups: RwLock<HashMap<ClientId, BroadcastGroup>>,

    /// Buffer size of each group's channel. Receivers that fall further
    /// behind skip the missed events.
    channel_capacity: usize,
}

impl SubscriberRegistry {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
            client_groups: RwLock::new(HashMap::new()),
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Create with default capacity (128 events).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Join a client to a group, creating the group if needed.
    ///
    /// A client belongs to at most one group; joining again moves it.
    pub async fn join(
        &self,
        group: &BroadcastGroup,
        client_id: ClientId,
    ) -> broadcast::Receiver<AdminEvent> {
        let mut groups = self.groups.write().await;

        let sender = groups.entry(group.clone()).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });

        self.client_groups
            .write()
            .await
            .insert(client_id.clone(), group.clone());

        tracing::debug!(client_id = %client_id, group = %group, "Client joined group");
        sender.subscribe()
    }

    /// Remove a client from its group.
    ///
    /// The group is dropped once it has no receivers left, so callers should
    /// drop their receiver first.
    pub async fn leave(&self, client_id: &ClientId) {
        let Some(group) = self.client_groups.write().await.remove(client_id) else {
            return;
        };

        let mut groups = self.groups.write().await;
        if let Some(sender) = groups.get(&group) {
            if sender.receiver_count() == 0 {
                groups.remove(&group);
            }
        }

        tracing::debug!(client_id = %client_id, group = %group, "Client left group");
    }

    /// Broadcast an event to every receiver in a group.
    ///
    /// Returns the number of receivers it was handed to. A group with no
    /// receivers is a no-op.
    pub async fn broadcast_to_group(&self, group: &BroadcastGroup, event: AdminEvent) -> usize {
        let groups = self.groups.read().await;

        match groups.get(group) {
            // Err only means nobody is listening
            Some(sender) => sender.send(event).unwrap_or(0),
            None => 0,
        }
    }

    /// Number of clients joined to a group.
    pub async fn client_count(&self, group: &BroadcastGroup) -> usize {
        self.client_groups
            .read()
            .await
            .values()
            .filter(|g| *g == group)
            .count()
    }

    /// Groups that currently exist (for monitoring).
    pub async fn active_groups(&self) -> Vec<BroadcastGroup> {
        self.groups.read().await.keys().cloned().collect()
    }

    pub async fn total_client_count(&self) -> usize {
        self.client_groups.read().await.len()
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl AdminBroadcaster for SubscriberRegistry {
    async fn broadcast(&self, event: AdminEvent) -> usize {
        let name = event.name();
        let payment_intent_id = event.payment_intent_id().to_string();
        let delivered = self.broadcast_to_group(&BroadcastGroup::admin(), event).await;

        tracing::debug!(
            event = name,
            payment_intent_id = %payment_intent_id,
            delivered,
            "Admin event broadcast"
        );
        delivered
    }
}
