//! Session-scoped admin notifications.
//!
//! Notifications are derived from admin events as they reach a session and
//! live only as long as that session. Newest first.

use serde::Serialize;

use crate::domain::foundation::{NotificationId, Timestamp};
use crate::domain::payment::AdminEvent;

/// Tag used to filter notifications by panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Payment,
    Request,
    Message,
    System,
}

/// A single notification shown to an administrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminNotification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    pub timestamp: Timestamp,
}

impl AdminNotification {
    pub fn new(
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            category,
            title: title.into(),
            message: message.into(),
            timestamp: Timestamp::now(),
        }
    }

    /// Describes a payment event for the payments panel.
    pub fn from_event(event: &AdminEvent) -> Self {
        let amount = format!("{:.2} {}", event.amount(), event.currency().to_uppercase());
        let (title, message) = match event {
            AdminEvent::PaymentInitiated(a) => (
                "Payment Initiated",
                format!("{} started a payment of {}", a.user_name, amount),
            ),
            AdminEvent::PaymentCompleted(a) => (
                "Payment Completed",
                format!("{} completed a payment of {}", a.user_name, amount),
            ),
            AdminEvent::PaymentWebhookConfirmed(o) => (
                "Payment Confirmed",
                format!("Payment {} of {} confirmed by processor", o.payment_intent_id, amount),
            ),
            AdminEvent::PaymentFailed(o) => (
                "Payment Failed",
                format!("Payment {} of {} failed", o.payment_intent_id, amount),
            ),
        };

        Self {
            id: NotificationId::new(),
            category: NotificationCategory::Payment,
            title: title.to_string(),
            message,
            timestamp: event.timestamp(),
        }
    }
}

/// Notifications held by one admin session.
#[derive(Debug, Clone, Default)]
pub struct NotificationList {
    items: Vec<AdminNotification>,
}

impl NotificationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a notification at the front.
    pub fn push(&mut self, notification: AdminNotification) {
        self.items.insert(0, notification);
    }

    /// Removes by id. Returns false when nothing matched.
    pub fn remove(&mut self, id: &NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != *id);
        self.items.len() != before
    }

    pub fn by_category(
        &self,
        category: NotificationCategory,
    ) -> impl Iterator<Item = &AdminNotification> {
        self.items.iter().filter(move |n| n.category == category)
    }

    /// The newest `limit` notifications of one category.
    pub fn recent(&self, category: NotificationCategory, limit: usize) -> Vec<&AdminNotification> {
        self.by_category(category).take(limit).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
