//! UseCase: 切断処理（disconnect イベント）
//!
//! 接続の送信チャンネルを登録解除し、セッションエントリがあれば削除して
//! 退出者の名前と残りの参加者リストを返す。エントリの削除だけが
//! 「left」アナウンスのトリガーであり、join せずに切断した接続は
//! 一切のブロードキャストを発生させない。

use std::sync::Arc;

use crate::domain::{ConnectionId, LeaveSnapshot, MessagePusher, RelayRepository};

/// 切断処理のユースケース
pub struct LeaveChatUseCase {
    repository: Arc<dyn RelayRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveChatUseCase {
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断処理を実行する
    ///
    /// 送信チャンネルの登録解除は残りの接続へのブロードキャストより前に
    /// 行われ、閉じた接続が送信対象に残らないようにする。`None` は
    /// 未 join の接続の切断を意味し、ブロードキャスト不要の合図になる。
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<LeaveSnapshot> {
        self.message_pusher.unregister_client(&connection_id).await;
        self.repository.leave(&connection_id).await
    }

    /// 残りの全接続へフレームをブロードキャスト
    pub async fn broadcast_to_all(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}
