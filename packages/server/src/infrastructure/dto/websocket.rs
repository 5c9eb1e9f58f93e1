//! WebSocket frame DTOs: the wire protocol of the relay.
//!
//! Frames are JSON text messages, adjacently tagged as
//! `{"event": <name>, "data": <payload>}`. Payload keys are part of the wire
//! contract, including the camelCase `isTyping` key and the omission of
//! `username` when the author never joined.
//!
//! Both directions are closed tagged unions: an inbound frame that does not
//! parse against `InboundFrame` is dropped by the handler with a warning.

use serde::{Deserialize, Serialize};

/// Record kind carried in `chat message` / `chat image` payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    System,
    User,
    Image,
}

/// A `chat message` payload: `system` announcements and `user` messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub r#type: MessageKind,
    pub text: String,
    /// Absent for system messages and for senders that never joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// RFC 3339 UTC, millisecond precision
    pub timestamp: String,
}

/// A `chat image` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMessageDto {
    pub r#type: MessageKind,
    /// Opaque image payload (base64), relayed as-is
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub timestamp: String,
}

/// A `user typing` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "isTyping")]
    pub is_typing: bool,
}

/// Client → server frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum InboundFrame {
    #[serde(rename = "user join")]
    UserJoin(String),
    #[serde(rename = "chat message")]
    ChatMessage(String),
    #[serde(rename = "chat image")]
    ChatImage(String),
    #[serde(rename = "typing")]
    Typing(bool),
}

/// Server → client frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum OutboundFrame {
    #[serde(rename = "users list")]
    UsersList(Vec<String>),
    #[serde(rename = "message history")]
    MessageHistory(Vec<ChatMessageDto>),
    #[serde(rename = "chat message")]
    ChatMessage(ChatMessageDto),
    #[serde(rename = "chat image")]
    ChatImage(ImageMessageDto),
    #[serde(rename = "user typing")]
    UserTyping(TypingDto),
}
