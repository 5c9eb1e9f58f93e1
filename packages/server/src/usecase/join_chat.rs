//! UseCase: 参加処理（user join イベント）
//!
//! 表示名を登録し、参加時点の参加者リストとメッセージ履歴のスナップショット
//! を返す。登録とスナップショットは Repository 内の同一クリティカル
//! セクションで行われるため、N 人目の join 後の参加者リストには必ず N 人の
//! 名前が挿入順で含まれる。
//!
//! ハンドラ側の送出順序の契約:
//! 1. users list を全接続へ
//! 2. message history を参加した接続のみへ
//! 3. join アナウンス（system メッセージ）を全接続へ

use std::sync::Arc;

use crate::domain::{ConnectionId, JoinSnapshot, MessagePusher, RelayRepository, Username};

/// 参加処理のユースケース
pub struct JoinChatUseCase {
    repository: Arc<dyn RelayRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinChatUseCase {
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 表示名を登録し、参加時点のスナップショットを返す
    ///
    /// 表示名は検証されない（空文字列・重複もそのまま受理）。同じ接続からの
    /// 再 join は既存エントリを上書きする。
    pub async fn execute(&self, connection_id: ConnectionId, name: Username) -> JoinSnapshot {
        self.repository.join(connection_id, name).await
    }

    /// 参加した接続のみへフレームを送信（履歴のリプレイ用）
    pub async fn push_to_joining(
        &self,
        connection_id: &ConnectionId,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .push_to(connection_id, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// 全接続へフレームをブロードキャスト（参加者リスト・アナウンス用）
    pub async fn broadcast_to_all(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}
