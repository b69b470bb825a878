//! CLI subcommands.

pub mod cart;
pub mod products;
pub mod status;

use shopfront_client::notify::drain;
use shopfront_client::{ApiError, ClientConfig, Notification, NotificationLevel, SessionStore};
use tokio::sync::broadcast;
use tracing::{error, info};

/// An initialized session plus the notifications it raised.
pub struct OpenSession {
    pub store: SessionStore,
    notifications: broadcast::Receiver<Notification>,
}

/// Create a session against the configured backend and run the startup
/// fetches.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub async fn open_session(config: &ClientConfig) -> Result<OpenSession, ApiError> {
    let store: SessionStore = SessionStore::from_config(config)?;
    let notifications = store.notifier().subscribe();

    store.initialize().await;

    Ok(OpenSession {
        store,
        notifications,
    })
}

impl OpenSession {
    /// Wait for queued cart pushes, then report every notification.
    pub async fn close(mut self) {
        self.store.flush().await;

        for Notification { level, message } in drain(&mut self.notifications) {
            match level {
                NotificationLevel::Success => info!("✔ {message}"),
                NotificationLevel::Error => error!("✘ {message}"),
            }
        }
    }
}
