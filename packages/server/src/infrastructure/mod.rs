//! Infrastructure layer: wire DTOs, the in-memory repository, and the
//! WebSocket message pusher.

pub mod dto;
pub mod message_pusher;
pub mod repository;
