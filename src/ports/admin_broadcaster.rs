//! Admin broadcaster port.
//!
//! Fan-out of payment lifecycle events to connected administrator sessions.

use async_trait::async_trait;

use crate::domain::payment::AdminEvent;

/// Delivers events to every session currently in the admin group.
///
/// Fire-and-forget: there is no acknowledgement and nothing is queued when
/// no administrator is connected.
#[async_trait]
pub trait AdminBroadcaster: Send + Sync {
    /// Broadcast an event. Returns how many sessions it was handed to.
    async fn broadcast(&self, event: AdminEvent) -> usize;
}
