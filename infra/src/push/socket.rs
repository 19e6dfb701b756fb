//! socket.io implementation of the push channel.

use async_trait::async_trait;
use futures_util::FutureExt;
use lp_core::errors::{ClientError, ClientResult};
use lp_core::services::session::{
    PushChannel, PushEvent, PushSubscription, FORCE_LOGOUT_EVENT, REGISTER_USER_EVENT,
};
use rust_socketio::asynchronous::{Client, ClientBuilder};
use rust_socketio::Payload;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::InfrastructureError;

/// Connects one socket per subscription.
///
/// The socket is closed when the subscription's guard is closed or
/// dropped.
#[derive(Debug, Clone)]
pub struct SocketIoPushChannel {
    url: String,
}

impl SocketIoPushChannel {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

fn push_error(err: rust_socketio::Error) -> ClientError {
    InfrastructureError::Push(err.to_string()).into()
}

#[async_trait]
impl PushChannel for SocketIoPushChannel {
    async fn subscribe(&self, user_id: &str) -> ClientResult<PushSubscription> {
        let (subscription, events, shutdown) = PushSubscription::channel();

        let socket = ClientBuilder::new(self.url.as_str())
            .on(FORCE_LOGOUT_EVENT, move |_payload: Payload, _socket: Client| {
                let events = events.clone();
                async move {
                    if let Some(event) = PushEvent::from_event_name(FORCE_LOGOUT_EVENT) {
                        let _ = events.send(event);
                    }
                }
                .boxed()
            })
            .on("error", |payload: Payload, _socket: Client| {
                async move {
                    warn!(payload = ?payload, "push channel error");
                }
                .boxed()
            })
            .connect()
            .await
            .map_err(push_error)?;

        if let Err(err) = socket.emit(REGISTER_USER_EVENT, json!(user_id)).await {
            let _ = socket.disconnect().await;
            return Err(push_error(err));
        }
        info!(user_id = %user_id, event = "push_registered", "Push channel connected");

        tokio::spawn(async move {
            // Resolves on close() or when the guard is dropped
            let _ = shutdown.await;
            match socket.disconnect().await {
                Ok(()) => debug!("push channel disconnected"),
                Err(err) => warn!(error = %err, "push channel disconnect failed"),
            }
        });

        Ok(subscription)
    }
}
