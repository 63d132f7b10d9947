//! Confirmation step before a request status change.
//!
//! The dialog holds no business rules. It remembers which request and
//! action the administrator picked and forwards them on confirm.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ServiceRequest;
use crate::ports::{RequestStatusUpdater, StatusUpdateError};

/// Action chosen for a request, e.g. `approve` or `complete`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusAction(String);

impl StatusAction {
    pub fn new(action: impl Into<String>) -> Self {
        Self(action.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PendingUpdate {
    request: ServiceRequest,
    action: StatusAction,
}

/// Open/closed dialog state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusUpdateDialog {
    pending: Option<PendingUpdate>,
}

impl StatusUpdateDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog for `request`, replacing any earlier selection.
    pub fn open(&mut self, request: ServiceRequest, action: StatusAction) {
        self.pending = Some(PendingUpdate { request, action });
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn request(&self) -> Option<&ServiceRequest> {
        self.pending.as_ref().map(|p| &p.request)
    }

    pub fn action(&self) -> Option<&StatusAction> {
        self.pending.as_ref().map(|p| &p.action)
    }

    /// Forwards the pending selection and closes the dialog.
    ///
    /// Returns `Ok(false)` when the dialog was not open. The dialog closes
    /// even if the updater fails.
    pub async fn confirm(
        &mut self,
        updater: &dyn RequestStatusUpdater,
    ) -> Result<bool, StatusUpdateError> {
        let Some(pending) = self.pending.take() else {
            return Ok(false);
        };
        updater
            .update_request_status(&pending.request.id, &pending.action)
            .await?;
        Ok(true)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
