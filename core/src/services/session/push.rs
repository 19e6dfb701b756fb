//! Push channel seam.
//!
//! The backend pushes a single event the client reacts to: a forced logout.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::errors::ClientResult;

/// Event emitted after connecting to identify the user
pub const REGISTER_USER_EVENT: &str = "registerUser";

/// Event received when the backend ends the session remotely
pub const FORCE_LOGOUT_EVENT: &str = "forceLogout";

/// Events delivered to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    ForceLogout,
}

impl PushEvent {
    /// Map a wire event name, ignoring anything unknown
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            FORCE_LOGOUT_EVENT => Some(PushEvent::ForceLogout),
            _ => None,
        }
    }
}

/// Closes the underlying connection when dropped
#[derive(Debug)]
pub struct PushGuard {
    shutdown: Option<oneshot::Sender<()>>,
}

impl PushGuard {
    pub fn new(shutdown: oneshot::Sender<()>) -> Self {
        Self {
            shutdown: Some(shutdown),
        }
    }

    pub fn close(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

impl Drop for PushGuard {
    fn drop(&mut self) {
        self.close();
    }
}

/// An open subscription: incoming events plus the handle that closes it
#[derive(Debug)]
pub struct PushSubscription {
    pub events: mpsc::UnboundedReceiver<PushEvent>,
    pub guard: PushGuard,
}

impl PushSubscription {
    /// Create a subscription and the ends the transport side keeps:
    /// the event sender and the shutdown signal
    pub fn channel() -> (Self, mpsc::UnboundedSender<PushEvent>, oneshot::Receiver<()>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let subscription = Self {
            events: event_rx,
            guard: PushGuard::new(shutdown_tx),
        };
        (subscription, event_tx, shutdown_rx)
    }
}

/// Connects to the push endpoint for one user
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Connect and emit `registerUser` with `user_id`
    async fn subscribe(&self, user_id: &str) -> ClientResult<PushSubscription>;
}
