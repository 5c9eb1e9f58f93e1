//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::MessagePusher;
use crate::usecase::{
    JoinChatUseCase, LeaveChatUseCase, RelayImageUseCase, RelayMessageUseCase,
    TypingIndicatorUseCase,
};

use super::{
    handler::{http::health_check, websocket::websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// Encapsulates the usecase wiring and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_chat_usecase,
///     relay_message_usecase,
///     relay_image_usecase,
///     typing_indicator_usecase,
///     leave_chat_usecase,
///     message_pusher,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    join_chat_usecase: Arc<JoinChatUseCase>,
    relay_message_usecase: Arc<RelayMessageUseCase>,
    relay_image_usecase: Arc<RelayImageUseCase>,
    typing_indicator_usecase: Arc<TypingIndicatorUseCase>,
    leave_chat_usecase: Arc<LeaveChatUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl Server {
    pub fn new(
        join_chat_usecase: Arc<JoinChatUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        relay_image_usecase: Arc<RelayImageUseCase>,
        typing_indicator_usecase: Arc<TypingIndicatorUseCase>,
        leave_chat_usecase: Arc<LeaveChatUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            join_chat_usecase,
            relay_message_usecase,
            relay_image_usecase,
            typing_indicator_usecase,
            leave_chat_usecase,
            message_pusher,
        }
    }

    /// Build the axum router with all routes wired to shared state.
    ///
    /// Split out from [`Server::run`] so integration tests can serve the
    /// router on an ephemeral port.
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            join_chat_usecase: self.join_chat_usecase,
            relay_message_usecase: self.relay_message_usecase,
            relay_image_usecase: self.relay_image_usecase,
            typing_indicator_usecase: self.typing_indicator_usecase,
            leave_chat_usecase: self.leave_chat_usecase,
            message_pusher: self.message_pusher,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the chat relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let app = self.into_router();

        // Bind the server to the host and port
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!("Chat relay server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
