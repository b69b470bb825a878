//! Background cart synchronization.
//!
//! Every authenticated cart mutation enqueues a full snapshot of the cart.
//! A single worker task sends the snapshots one at a time, in the order they
//! were queued, so a slow early push can never land after a later one from
//! the same session. Failures are reported through the notifier and are not
//! retried; local state stays as it is.

use std::sync::Arc;

use shopfront_core::{CartItems, UserId};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::api::RemoteApi;
use crate::notify::Notifier;

enum SyncCommand {
    Push { user_id: UserId, items: CartItems },
    Flush(oneshot::Sender<()>),
}

/// Handle to the cart sync worker. The worker exits once every handle is
/// dropped.
#[derive(Clone)]
pub struct CartSync {
    tx: mpsc::UnboundedSender<SyncCommand>,
}

impl CartSync {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<A: RemoteApi>(api: Arc<A>, notifier: Notifier) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(api, notifier, rx));
        Self { tx }
    }

    /// Queue a cart snapshot for `user_id`.
    pub fn push(&self, user_id: UserId, items: CartItems) {
        if self.tx.send(SyncCommand::Push { user_id, items }).is_err() {
            warn!("Cart sync worker stopped, dropping cart push");
        }
    }

    /// Wait until every push queued before this call has completed.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(SyncCommand::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }
}

async fn run<A: RemoteApi>(
    api: Arc<A>,
    notifier: Notifier,
    mut rx: mpsc::UnboundedReceiver<SyncCommand>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            SyncCommand::Push { user_id, items } => {
                match api.update_cart(&user_id, &items).await {
                    Ok(()) => debug!(user_id = %user_id, lines = items.len(), "Cart pushed"),
                    Err(e) => {
                        warn!(user_id = %user_id, error = %e, "Cart push failed");
                        notifier.error(e.to_string());
                    }
                }
            }
            SyncCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    debug!("Cart sync worker stopped");
}
