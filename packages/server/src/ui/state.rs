//! Server state and connection management.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{
    JoinChatUseCase, LeaveChatUseCase, RelayImageUseCase, RelayMessageUseCase,
    TypingIndicatorUseCase,
};

/// Shared application state
pub struct AppState {
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    pub relay_image_usecase: Arc<RelayImageUseCase>,
    pub typing_indicator_usecase: Arc<TypingIndicatorUseCase>,
    pub leave_chat_usecase: Arc<LeaveChatUseCase>,
    /// MessagePusher, used directly by the WebSocket handler to register the
    /// outbound channel of a freshly upgraded connection
    pub message_pusher: Arc<dyn MessagePusher>,
}
