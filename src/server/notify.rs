//! Outbound notifications.
//!
//! Notifications are side effects of committed state changes. Callers log a failed
//! delivery and carry on; a notifier error never undoes the change that triggered it.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::server::error::gateway::GatewayError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    VisitorCreated {
        user_id: i32,
        hostel_id: i32,
        expires_at: NaiveDateTime,
        temporary_password: Option<String>,
    },
    VisitorExpiringSoon {
        user_id: i32,
        hostel_id: i32,
        expires_at: NaiveDateTime,
    },
    VisitorRevoked {
        user_id: i32,
        hostel_id: i32,
    },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), GatewayError>;
}

/// Writes notifications to the log instead of delivering them.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), GatewayError> {
        match &notification {
            Notification::VisitorCreated {
                user_id, hostel_id, ..
            } => tracing::info!(user_id, hostel_id, "Visitor account created"),
            Notification::VisitorExpiringSoon {
                user_id,
                hostel_id,
                expires_at,
            } => tracing::info!(user_id, hostel_id, %expires_at, "Visitor access expiring soon"),
            Notification::VisitorRevoked { user_id, hostel_id } => {
                tracing::info!(user_id, hostel_id, "Visitor access revoked")
            }
        }

        Ok(())
    }
}

/// Deliver a notification, logging instead of propagating a failure.
pub async fn notify_best_effort(notifier: &dyn Notifier, notification: Notification) {
    if let Err(e) = notifier.notify(notification).await {
        tracing::warn!("Failed to deliver notification: {}", e);
    }
}
