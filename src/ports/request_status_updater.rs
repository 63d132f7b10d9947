//! Port for changing the status of a service request.
//!
//! The request store lives outside this service; the dashboard only
//! forwards the administrator's choice.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::dashboard::StatusAction;

/// Error reported by the external request store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status update failed: {0}")]
pub struct StatusUpdateError(pub String);

/// Applies a status action to a service request.
#[async_trait]
pub trait RequestStatusUpdater: Send + Sync {
    async fn update_request_status(
        &self,
        request_id: &str,
        action: &StatusAction,
    ) -> Result<(), StatusUpdateError>;
}
