//! Admin dashboard read model.
//!
//! Filtering over the service-request collection, session notifications,
//! and the status-update confirmation step.

pub mod notifications;
pub mod requests;
pub mod status_dialog;

pub use notifications::{AdminNotification, NotificationCategory, NotificationList};
pub use requests::{
    RequestStats, RequestStatus, RequestTab, RequestTabs, ServiceRequest, TabKey,
};
pub use status_dialog::{StatusAction, StatusUpdateDialog};
