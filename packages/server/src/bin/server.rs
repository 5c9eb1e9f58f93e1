//! WebSocket chat relay server.
//!
//! Relays chat messages, images, typing indicators, and presence changes
//! between all connected clients, with full history replay on join.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-server
//! cargo run --bin irori-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use irori_server::{
    domain::RelayState,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRelayRepository},
    ui::Server,
    usecase::{
        JoinChatUseCase, LeaveChatUseCase, RelayImageUseCase, RelayMessageUseCase,
        TypingIndicatorUseCase,
    },
};
use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "WebSocket chat relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory state, reset on restart)
    let state = Arc::new(Mutex::new(RelayState::new()));
    let repository = Arc::new(InMemoryRelayRepository::new(state));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients.clone()));

    // 3. Create UseCases
    let join_chat_usecase = Arc::new(JoinChatUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let relay_image_usecase = Arc::new(RelayImageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let typing_indicator_usecase = Arc::new(TypingIndicatorUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let leave_chat_usecase = Arc::new(LeaveChatUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));

    // 4. Create and run the server
    let server = Server::new(
        join_chat_usecase,
        relay_message_usecase,
        relay_image_usecase,
        typing_indicator_usecase,
        leave_chat_usecase,
        message_pusher,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
