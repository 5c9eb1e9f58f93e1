//! UseCase: 画像メッセージ中継処理（chat image イベント）
//!
//! 送信者の表示名を解決して `ImageMessage` を構築し、送信者を含む全接続へ
//! 中継する。画像レコードはログへ追記しないため、後から参加した接続の
//! 履歴リプレイはテキストのみになる。

use std::sync::Arc;

use irori_shared::time::get_utc_timestamp;

use crate::domain::{ConnectionId, ImageMessage, MessagePusher, RelayRepository, Timestamp};

/// 画像メッセージ中継のユースケース
pub struct RelayImageUseCase {
    repository: Arc<dyn RelayRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayImageUseCase {
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 画像レコードを構築して返す（ログへは追記しない）
    ///
    /// 画像ペイロードは不透明な文字列（base64）としてそのまま中継される。
    pub async fn execute(&self, connection_id: ConnectionId, image: String) -> ImageMessage {
        let username = self.repository.resolve(&connection_id).await;
        ImageMessage::new(username, image, Timestamp::new(get_utc_timestamp()))
    }

    /// 全接続へフレームをブロードキャスト（送信者を含む）
    pub async fn broadcast_to_all(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}
