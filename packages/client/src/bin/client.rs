//! CLI WebSocket chat client.
//!
//! Connects to the chat relay, joins with a display name, and sends messages
//! from stdin. Automatically reconnects on disconnection (max 5 attempts with
//! 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-client -- --username Alice
//! cargo run --bin irori-client -- -n Bob --url ws://example.com:8080/ws
//! ```

use clap::Parser;

use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "CLI chat client for the irori relay", long_about = None)]
struct Args {
    /// Display name to join the chat with (not required to be unique)
    #[arg(short = 'n', long)]
    username: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = irori_client::run_client(args.url, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
