//! Time utilities with clock abstraction for testability.
//!
//! All timestamps in the relay are UTC Unix milliseconds. On the wire they
//! are rendered as RFC 3339 with millisecond precision and a `Z` suffix.

use chrono::{SecondsFormat, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current UTC Unix timestamp (milliseconds)
    fn now_utc_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc_millis(&self) -> i64 {
        get_utc_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_utc_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current UTC Unix timestamp (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 UTC format
///
/// Millisecond precision with `Z` suffix, e.g. `2023-01-01T00:00:00.000Z`.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    let seconds = timestamp_millis.div_euclid(1000);
    let nanos = (timestamp_millis.rem_euclid(1000) * 1_000_000) as u32;
    match Utc.timestamp_opt(seconds, nanos).single() {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        // Out-of-range timestamps are not produced by the relay itself
        None => String::from("1970-01-01T00:00:00.000Z"),
    }
}
