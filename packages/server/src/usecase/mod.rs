//! UseCase layer: one usecase per inbound event.
//!
//! Each usecase owns the domain mutation for its event and exposes the fanout
//! primitives the handler orchestrates. Serialization of wire frames stays in
//! the UI layer; usecases deal in domain types and pre-serialized JSON only.

pub mod join_chat;
pub mod leave_chat;
pub mod relay_image;
pub mod relay_message;
pub mod typing_indicator;

pub use join_chat::JoinChatUseCase;
pub use leave_chat::LeaveChatUseCase;
pub use relay_image::RelayImageUseCase;
pub use relay_message::RelayMessageUseCase;
pub use typing_indicator::TypingIndicatorUseCase;
