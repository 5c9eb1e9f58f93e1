//! Chat relay server library.
//!
//! Clients connect over a WebSocket, announce a display name, and exchange
//! text and image messages with typing indicators and presence updates.
//! Every inbound event is fanned out to all connections, all-except-sender,
//! or a single connection, per the event contract.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
