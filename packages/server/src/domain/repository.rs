//! Repository trait for the relay's shared state.
//!
//! The usecase layer depends on this trait; infrastructure provides the
//! in-memory implementation (dependency inversion). Every operation is atomic
//! with respect to the others: mutation and any snapshot the caller needs
//! happen under one critical section, preserving the serialized
//! event-processing contract.

use async_trait::async_trait;

use super::entity::UserMessage;
use super::value_object::{ConnectionId, Timestamp, Username};

/// Presence and history snapshot taken at the moment of a join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSnapshot {
    /// All registered display names, insertion order, joiner included
    pub names: Vec<Username>,
    /// Full text-message history at join time
    pub history: Vec<UserMessage>,
}

/// Result of removing a registered session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveSnapshot {
    /// The display name the departed connection was registered under
    pub name: Username,
    /// Remaining display names, insertion order
    pub names: Vec<Username>,
}

#[async_trait]
pub trait RelayRepository: Send + Sync {
    /// Register (or overwrite) the display name for a connection and snapshot
    /// presence + history in the same critical section.
    async fn join(&self, connection_id: ConnectionId, name: Username) -> JoinSnapshot;

    /// Display name for a connection; `None` if it never joined or already
    /// left. Never fails.
    async fn resolve(&self, connection_id: &ConnectionId) -> Option<Username>;

    /// Remove the session entry if present. `None` means the connection never
    /// joined and no leave broadcast is due.
    async fn leave(&self, connection_id: &ConnectionId) -> Option<LeaveSnapshot>;

    /// Build a `UserMessage` for the sender (author resolved in the same
    /// critical section) and append it to the log.
    async fn append_user_message(
        &self,
        connection_id: &ConnectionId,
        text: String,
        timestamp: Timestamp,
    ) -> UserMessage;

    /// Full text-message history, arrival order
    async fn history(&self) -> Vec<UserMessage>;

    /// Number of registered (joined) sessions
    async fn count_sessions(&self) -> usize;
}
