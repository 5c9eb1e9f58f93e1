//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs (the wire protocol)
//! - `conversion`: domain entity ↔ DTO conversion

pub mod conversion;
pub mod websocket;
