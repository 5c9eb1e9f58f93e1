//! MessagePusher trait: the transport abstraction the relay fans out through.
//!
//! One outbound queue per connection. Emits are fire-and-forget sends into
//! those queues, never synchronous round-trips; a send to a closed connection
//! is the implementation's problem to swallow or log.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// Per-connection outbound channel carrying serialized frames
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Transport seam between the relay and the per-connection WebSocket tasks.
///
/// Supports the three fanout shapes of the event contract: a single target,
/// all connections, and all connections except the sender.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register the outbound channel for a freshly upgraded connection
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Drop the outbound channel for a closed connection
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Emit to exactly one connection
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Emit to every registered connection, sender included
    async fn broadcast_all(&self, content: &str) -> Result<(), MessagePushError>;

    /// Emit to every registered connection except `exclude`
    async fn broadcast_except(
        &self,
        exclude: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
