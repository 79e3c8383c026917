//! User-facing notifications emitted by the retirement flow.

use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Failure,
}

/// A dismissible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn retired() -> Self {
        Self {
            level: NotificationLevel::Success,
            title: "Credit retired".to_string(),
            description: "This carbon credit has been marked as used for offset.".to_string(),
        }
    }

    /// Failure carrying the underlying message, or a generic one.
    pub fn retire_failed(message: &str) -> Self {
        let description = if message.trim().is_empty() {
            "Retire failed".to_string()
        } else {
            message.to_string()
        };
        Self {
            level: NotificationLevel::Failure,
            title: "Retire failed".to_string(),
            description,
        }
    }

    pub fn connect_wallet() -> Self {
        Self {
            level: NotificationLevel::Failure,
            title: "Connect wallet".to_string(),
            description: "Connect a wallet to retire credits.".to_string(),
        }
    }
}

/// Broadcast channel for notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Send to current subscribers; nobody listening is fine.
    pub fn send(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(16)
    }
}
