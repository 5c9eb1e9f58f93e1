//! Entities for the chat relay: message records, the session registry,
//! and the append-only message log.

use super::value_object::{ConnectionId, Timestamp, Username};

/// A text message authored by a client.
///
/// `username` is a snapshot of the registry lookup at creation time, not a
/// live reference; it is absent when the sender never joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub username: Option<Username>,
    pub text: String,
    pub timestamp: Timestamp,
}

impl UserMessage {
    pub fn new(username: Option<Username>, text: String, timestamp: Timestamp) -> Self {
        Self {
            username,
            text,
            timestamp,
        }
    }
}

/// An image message. Relayed to all connections but never stored in the log,
/// so history replay stays text-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMessage {
    pub username: Option<Username>,
    pub image: String,
    pub timestamp: Timestamp,
}

impl ImageMessage {
    pub fn new(username: Option<Username>, image: String, timestamp: Timestamp) -> Self {
        Self {
            username,
            image,
            timestamp,
        }
    }
}

/// A server-generated announcement (join/leave).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemMessage {
    pub text: String,
    pub timestamp: Timestamp,
}

impl SystemMessage {
    /// Announcement for a client joining the chat
    pub fn joined(name: &Username, timestamp: Timestamp) -> Self {
        Self {
            text: format!("{} has joined the chat", name.as_str()),
            timestamp,
        }
    }

    /// Announcement for a client leaving the chat
    pub fn left(name: &Username, timestamp: Timestamp) -> Self {
        Self {
            text: format!("{} has left the chat", name.as_str()),
            timestamp,
        }
    }
}

/// Maps each live connection to its chosen display name.
///
/// Authoritative source of "who is online". Insertion-ordered: presence lists
/// are rebuilt from iteration order, and a re-join overwrites the name while
/// keeping the original position.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    entries: Vec<(ConnectionId, Username)>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite the display name for `connection_id`.
    ///
    /// At most one entry per connection; overwriting keeps the entry's
    /// insertion position.
    pub fn join(&mut self, connection_id: ConnectionId, name: Username) {
        if let Some(entry) = self.entries.iter_mut().find(|(id, _)| *id == connection_id) {
            entry.1 = name;
        } else {
            self.entries.push((connection_id, name));
        }
    }

    /// Resolve the display name for `connection_id`.
    ///
    /// Absence is a normal, expected outcome (events can arrive before a
    /// join), never an error.
    pub fn resolve(&self, connection_id: &ConnectionId) -> Option<Username> {
        self.entries
            .iter()
            .find(|(id, _)| id == connection_id)
            .map(|(_, name)| name.clone())
    }

    /// Remove the entry for `connection_id`, returning the name if one
    /// existed so the caller can decide whether to broadcast a leave.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Option<Username> {
        let index = self.entries.iter().position(|(id, _)| id == connection_id)?;
        Some(self.entries.remove(index).1)
    }

    /// Snapshot of all registered display names, in insertion order.
    pub fn names(&self) -> Vec<Username> {
        self.entries.iter().map(|(_, name)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Append-only ordered history of user messages.
///
/// Sequence order equals arrival order; records are never removed or mutated
/// after append. Lives for process uptime, reset only on restart.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    records: Vec<UserMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: UserMessage) {
        self.records.push(record);
    }

    /// Snapshot of the full history, in arrival order.
    pub fn snapshot(&self) -> Vec<UserMessage> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The only shared mutable state of the relay: registry + log.
///
/// Owned by a single serializing component (one mutex in the repository), so
/// event handlers never interleave their effects on it.
#[derive(Debug, Clone, Default)]
pub struct RelayState {
    pub registry: SessionRegistry,
    pub log: MessageLog,
}

impl RelayState {
    pub fn new() -> Self {
        Self::default()
    }
}
