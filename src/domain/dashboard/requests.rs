//! Service-request views for the admin dashboard.
//!
//! Tabs group requests by status; `RequestStats` counts them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Status of a customer's service request.
///
/// Statuses this dashboard does not group on are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    Pending,
    Approved,
    Completed,
    Other(String),
}

impl RequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Completed => "completed",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for RequestStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "completed" => Self::Completed,
            _ => Self::Other(s),
        }
    }
}

impl From<RequestStatus> for String {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// A service request as listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: String,
    pub customer_name: String,
    pub service_type: String,
    pub status: RequestStatus,
    pub created_at: Timestamp,
}

/// Which slice of the request collection a tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKey {
    Pending,
    Approved,
    Completed,
    All,
}

impl TabKey {
    pub const ORDER: [TabKey; 4] = [Self::Pending, Self::Approved, Self::Completed, Self::All];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Completed => "Completed",
            Self::All => "All Requests",
        }
    }

    /// Text shown when the tab has no requests.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Self::Pending => "No pending requests. All requests have been processed.",
            Self::Approved => "No requests are currently approved.",
            Self::Completed => "No requests have been completed yet.",
            Self::All => "No service requests in the system.",
        }
    }

    /// Exact status equality; `All` matches everything.
    pub fn matches(&self, status: &RequestStatus) -> bool {
        match self {
            Self::Pending => *status == RequestStatus::Pending,
            Self::Approved => *status == RequestStatus::Approved,
            Self::Completed => *status == RequestStatus::Completed,
            Self::All => true,
        }
    }
}

/// One tab of the request view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTab {
    pub value: TabKey,
    pub label: &'static str,
    pub data: Vec<ServiceRequest>,
    pub empty_message: &'static str,
}

impl RequestTab {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The four request tabs, in display order, each preserving input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestTabs(Vec<RequestTab>);

impl RequestTabs {
    pub fn from_requests(requests: &[ServiceRequest]) -> Self {
        let tabs = TabKey::ORDER
            .iter()
            .map(|key| RequestTab {
                value: *key,
                label: key.label(),
                data: requests
                    .iter()
                    .filter(|r| key.matches(&r.status))
                    .cloned()
                    .collect(),
                empty_message: key.empty_message(),
            })
            .collect();
        Self(tabs)
    }

    pub fn tab(&self, key: TabKey) -> Option<&RequestTab> {
        self.0.iter().find(|t| t.value == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RequestTab> {
        self.0.iter()
    }
}

/// Headline counts shown above the tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub completed: usize,
}

impl RequestStats {
    pub fn from_requests(requests: &[ServiceRequest]) -> Self {
        requests.iter().fold(
            Self {
                total: requests.len(),
                ..Self::default()
            },
            |mut stats, r| {
                match r.status {
                    RequestStatus::Pending => stats.pending += 1,
                    RequestStatus::Approved => stats.approved += 1,
                    RequestStatus::Completed => stats.completed += 1,
                    RequestStatus::Other(_) => {}
                }
                stats
            },
        )
    }
}

#[cfg(test)]
#[path = "requests_test.rs"]
mod requests_test;
