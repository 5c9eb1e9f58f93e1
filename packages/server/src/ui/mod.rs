//! UI layer: HTTP/WebSocket endpoints and server wiring.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
