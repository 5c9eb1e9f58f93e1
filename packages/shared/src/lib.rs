//! Shared utilities for the irori chat relay.
//!
//! Logging setup and time helpers used by both the server and the CLI client.

pub mod logger;
pub mod time;
