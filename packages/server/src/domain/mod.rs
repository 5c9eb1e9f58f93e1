//! Domain layer for the chat relay.
//!
//! Value objects, the session/history entities, and the traits the usecase
//! layer depends on (`RelayRepository`, `MessagePusher`). Infrastructure
//! provides the concrete implementations (dependency inversion).

pub mod entity;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ImageMessage, MessageLog, RelayState, SessionRegistry, SystemMessage, UserMessage};
pub use message_pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use repository::{JoinSnapshot, LeaveSnapshot, RelayRepository};
pub use value_object::{ConnectionId, Timestamp, Username};
