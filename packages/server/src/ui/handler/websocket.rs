//! WebSocket connection handler.
//!
//! Mints a connection identity at upgrade, registers the outbound channel,
//! and dispatches inbound frames to the usecase for their event. Disconnect
//! cleanup runs when either task finishes, whatever the reason the socket
//! went away.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use irori_shared::time::get_utc_timestamp;

use crate::{
    domain::{ConnectionId, SystemMessage, Timestamp, Username},
    infrastructure::dto::websocket::{ChatMessageDto, InboundFrame, OutboundFrame, TypingDto},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Connection identity is transport-owned: minted here, meaningless after
    // the connection closes. No join is required to receive broadcasts.
    let connection_id = ConnectionId::new();

    // Create a channel for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();
    state.message_pusher.register_client(connection_id, tx).await;

    tracing::info!("Connection '{}' established", connection_id);

    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, rx))
}

/// Spawns a task that drains the connection's outbound queue into the
/// WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();

    // Spawn a task to receive frames from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    match serde_json::from_str::<InboundFrame>(&text) {
                        Ok(frame) => dispatch_frame(&state_clone, connection_id, frame).await,
                        Err(e) => {
                            // Closed union: frames that do not parse against
                            // the inbound contract are dropped, not relayed.
                            tracing::warn!(
                                "Dropping unparseable frame from '{}': {}",
                                connection_id,
                                e
                            );
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push frames from other connections to this one
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Unregister the connection; broadcast presence + farewell only if it had
    // joined. A connection that never joined disconnects silently.
    match state.leave_chat_usecase.execute(connection_id).await {
        Some(snapshot) => {
            let users_json = serde_json::to_string(&OutboundFrame::UsersList(
                snapshot
                    .names
                    .into_iter()
                    .map(|name| name.into_string())
                    .collect(),
            ))
            .unwrap();
            if let Err(e) = state.leave_chat_usecase.broadcast_to_all(&users_json).await {
                tracing::warn!("Failed to broadcast users list: {}", e);
            }

            let farewell =
                SystemMessage::left(&snapshot.name, Timestamp::new(get_utc_timestamp()));
            let farewell_json =
                serde_json::to_string(&OutboundFrame::ChatMessage(farewell.into())).unwrap();
            if let Err(e) = state
                .leave_chat_usecase
                .broadcast_to_all(&farewell_json)
                .await
            {
                tracing::warn!("Failed to broadcast leave announcement: {}", e);
            }

            tracing::info!(
                "Connection '{}' ('{}') disconnected",
                connection_id,
                snapshot.name
            );
        }
        None => {
            tracing::info!(
                "Connection '{}' disconnected before joining; no leave broadcast",
                connection_id
            );
        }
    }
}

/// Dispatch table keyed by event tag
async fn dispatch_frame(state: &Arc<AppState>, connection_id: ConnectionId, frame: InboundFrame) {
    match frame {
        InboundFrame::UserJoin(name) => on_user_join(state, connection_id, name).await,
        InboundFrame::ChatMessage(text) => on_chat_message(state, connection_id, text).await,
        InboundFrame::ChatImage(image) => on_chat_image(state, connection_id, image).await,
        InboundFrame::Typing(is_typing) => on_typing(state, connection_id, is_typing).await,
    }
}

async fn on_user_join(state: &Arc<AppState>, connection_id: ConnectionId, name: String) {
    // No validation on the name: empty and duplicate names are accepted
    let name = Username::new(name);
    let snapshot = state
        .join_chat_usecase
        .execute(connection_id, name.clone())
        .await;

    // Visible order to the joining client: users list, then history, then
    // the join announcement. This ordering is part of the contract.
    let users_json = serde_json::to_string(&OutboundFrame::UsersList(
        snapshot
            .names
            .into_iter()
            .map(|name| name.into_string())
            .collect(),
    ))
    .unwrap();
    if let Err(e) = state.join_chat_usecase.broadcast_to_all(&users_json).await {
        tracing::warn!("Failed to broadcast users list: {}", e);
    }

    // History replay goes to the joining connection only, so existing members
    // never see it twice
    let history: Vec<ChatMessageDto> = snapshot.history.into_iter().map(Into::into).collect();
    let history_json = serde_json::to_string(&OutboundFrame::MessageHistory(history)).unwrap();
    if let Err(e) = state
        .join_chat_usecase
        .push_to_joining(&connection_id, &history_json)
        .await
    {
        tracing::warn!("Failed to replay history to '{}': {}", connection_id, e);
    }

    let announcement = SystemMessage::joined(&name, Timestamp::new(get_utc_timestamp()));
    let announcement_json =
        serde_json::to_string(&OutboundFrame::ChatMessage(announcement.into())).unwrap();
    if let Err(e) = state
        .join_chat_usecase
        .broadcast_to_all(&announcement_json)
        .await
    {
        tracing::warn!("Failed to broadcast join announcement: {}", e);
    }

    tracing::info!("Connection '{}' joined as '{}'", connection_id, name);
}

async fn on_chat_message(state: &Arc<AppState>, connection_id: ConnectionId, text: String) {
    let record = state
        .relay_message_usecase
        .execute(connection_id, text)
        .await;

    // Echo-back: the sender receives its own message like everyone else
    let frame_json = serde_json::to_string(&OutboundFrame::ChatMessage(record.into())).unwrap();
    if let Err(e) = state
        .relay_message_usecase
        .broadcast_to_all(&frame_json)
        .await
    {
        tracing::warn!("Failed to broadcast chat message: {}", e);
    }
}

async fn on_chat_image(state: &Arc<AppState>, connection_id: ConnectionId, image: String) {
    let record = state.relay_image_usecase.execute(connection_id, image).await;

    let frame_json = serde_json::to_string(&OutboundFrame::ChatImage(record.into())).unwrap();
    if let Err(e) = state.relay_image_usecase.broadcast_to_all(&frame_json).await {
        tracing::warn!("Failed to broadcast chat image: {}", e);
    }
}

async fn on_typing(state: &Arc<AppState>, connection_id: ConnectionId, is_typing: bool) {
    let username = state.typing_indicator_usecase.execute(connection_id).await;

    // No self-echo for typing indicators
    let frame_json = serde_json::to_string(&OutboundFrame::UserTyping(TypingDto {
        username: username.map(|name| name.into_string()),
        is_typing,
    }))
    .unwrap();
    if let Err(e) = state
        .typing_indicator_usecase
        .broadcast_to_others(&connection_id, &frame_json)
        .await
    {
        tracing::warn!("Failed to broadcast typing indicator: {}", e);
    }
}
