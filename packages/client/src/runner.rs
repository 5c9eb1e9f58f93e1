//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    domain::should_attempt_reconnect, error::ClientError, session::run_client_session,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the WebSocket client with reconnection logic
pub async fn run_client(url: String, username: String) -> Result<(), ClientError> {
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            username,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &username).await {
            Ok(_) => {
                tracing::info!("Client session ended normally");
                // If connection ended normally (user exit), don't reconnect
                break;
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
