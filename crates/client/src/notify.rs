//! Transient user notifications ("toasts").
//!
//! The session store reports the outcome of user actions and background
//! failures here. Views subscribe and render whatever arrives; nobody has to
//! be listening for a notification to be sent.

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;

/// Number of notifications buffered per subscriber before the oldest is
/// dropped.
pub const CHANNEL_CAPACITY: usize = 256;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A message to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    /// Create a success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Create an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Fire-and-forget notification sender.
///
/// Clones share the same channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Receive every notification sent from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Send a success notification.
    pub fn success(&self, message: impl Into<String>) {
        self.send(Notification::success(message));
    }

    /// Send an error notification.
    pub fn error(&self, message: impl Into<String>) {
        self.send(Notification::error(message));
    }

    /// Send a notification to all current subscribers.
    pub fn send(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::debug!(message = %notification.message, "Notify success");
            }
            NotificationLevel::Error => {
                tracing::warn!(message = %notification.message, "Notify error");
            }
        }

        // No subscribers is fine
        let _ = self.tx.send(notification);
    }
}

/// Take every notification currently buffered for `rx`.
///
/// A receiver that fell behind loses the oldest notifications; the skip is
/// logged and the rest are still returned.
pub fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(notification) => out.push(notification),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Notification receiver lagged, oldest notifications dropped");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    out
}
