//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use irori_server::infrastructure::dto::websocket::{InboundFrame, OutboundFrame};

use crate::{
    domain::{InputCommand, parse_input},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// Run the WebSocket client session
pub async fn run_client_session(url: &str, username: &str) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat relay!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send.\n\
         Commands: /image <data> to send an image, /quit to exit.\n",
        username
    );

    let (mut write, mut read) = ws_stream.split();

    // Announce ourselves; the relay replies with the users list, the message
    // history, and the join announcement
    let join_frame = serde_json::to_string(&InboundFrame::UserJoin(username.to_string()))
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::text(join_frame))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    // Clone username for read task
    let username_for_read = username.to_string();

    // Spawn a task to handle incoming frames
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<OutboundFrame>(&text) {
                        Ok(OutboundFrame::UsersList(names)) => {
                            let formatted =
                                MessageFormatter::format_users_list(&names, &username_for_read);
                            print!("{}", formatted);
                            redisplay_prompt(&username_for_read);
                        }
                        Ok(OutboundFrame::MessageHistory(records)) => {
                            let formatted = MessageFormatter::format_history(&records);
                            print!("{}", formatted);
                            redisplay_prompt(&username_for_read);
                        }
                        Ok(OutboundFrame::ChatMessage(record)) => {
                            let formatted = MessageFormatter::format_chat_message(&record);
                            print!("{}", formatted);
                            redisplay_prompt(&username_for_read);
                        }
                        Ok(OutboundFrame::ChatImage(record)) => {
                            let formatted = MessageFormatter::format_image_message(&record);
                            print!("{}", formatted);
                            redisplay_prompt(&username_for_read);
                        }
                        Ok(OutboundFrame::UserTyping(typing)) => {
                            if let Some(formatted) = MessageFormatter::format_typing(
                                typing.username.as_deref(),
                                typing.is_typing,
                            ) {
                                print!("{}", formatted);
                                redisplay_prompt(&username_for_read);
                            }
                        }
                        // If parsing fails, display as raw text
                        Err(_) => {
                            let formatted = MessageFormatter::format_raw_message(&text);
                            print!("{}", formatted);
                            redisplay_prompt(&username_for_read);
                        }
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let username_for_prompt = username.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", username_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn input lines into frames.
    // Sent messages are not locally echoed: the relay broadcasts every chat
    // message back to its sender, so the read task displays them.
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let frame = match parse_input(&line) {
                InputCommand::Message(text) => InboundFrame::ChatMessage(text),
                InputCommand::Image(data) => InboundFrame::ChatImage(data),
                InputCommand::Quit => break,
            };

            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize frame: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::text(json)).await {
                tracing::warn!("Failed to send frame: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
    }

    Ok(())
}
