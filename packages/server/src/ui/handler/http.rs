//! HTTP endpoint handlers.

/// Health check endpoint: a static confirmation string on `GET /`
pub async fn health_check() -> &'static str {
    "irori chat relay is running"
}
