//! WebSocket-backed MessagePusher implementation.
//!
//! Owns the map of live connections to their outbound `UnboundedSender`
//! queues. WebSocket creation stays in the UI layer; this implementation only
//! receives the senders and fans serialized frames out through them.
//!
//! Broadcasts tolerate partial failure: a send to a connection that is closing
//! concurrently is logged and skipped, never surfaced to the caller.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket MessagePusher
///
/// Key: connection identity, Value: outbound frame queue for that connection.
pub struct WebSocketMessagePusher {
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(connection_id) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed frame to connection '{}'", connection_id);
            Ok(())
        } else {
            Err(MessagePushError::ConnectionNotFound(
                connection_id.to_string(),
            ))
        }
    }

    async fn broadcast_all(&self, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for (connection_id, sender) in clients.iter() {
            // Broadcasts tolerate individual send failures
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!(
                    "Failed to push frame to connection '{}': {}",
                    connection_id,
                    e
                );
            }
        }

        Ok(())
    }

    async fn broadcast_except(
        &self,
        exclude: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for (connection_id, sender) in clients.iter() {
            if connection_id == exclude {
                continue;
            }
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!(
                    "Failed to push frame to connection '{}': {}",
                    connection_id,
                    e
                );
            }
        }

        Ok(())
    }
}
