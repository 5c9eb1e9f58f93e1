//! UseCase: テキストメッセージ中継処理（chat message イベント）
//!
//! 送信者の表示名を解決し（未 join なら著者なし）、現在時刻のタイムスタンプで
//! `UserMessage` を構築してログへ追記する。ブロードキャストは送信者自身を
//! 含む全接続が対象（エコーバック）。
//!
//! ペイロードは検証もサニタイズもされない。不正な内容もそのまま中継される
//! 寛容な契約であり、意図的なものである。

use std::sync::Arc;

use irori_shared::time::get_utc_timestamp;

use crate::domain::{ConnectionId, MessagePusher, RelayRepository, Timestamp, UserMessage};

/// テキストメッセージ中継のユースケース
pub struct RelayMessageUseCase {
    repository: Arc<dyn RelayRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayMessageUseCase {
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// メッセージレコードを構築してログへ追記し、そのレコードを返す
    ///
    /// 著者名の解決と追記は同一クリティカルセクションで行われるため、
    /// レコードは送信時点の表示名を保持する。
    pub async fn execute(&self, connection_id: ConnectionId, text: String) -> UserMessage {
        let timestamp = Timestamp::new(get_utc_timestamp());
        self.repository
            .append_user_message(&connection_id, text, timestamp)
            .await
    }

    /// 全接続へフレームをブロードキャスト（送信者を含む）
    pub async fn broadcast_to_all(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message_pusher::MockMessagePusher;
    use crate::domain::{RelayState, Username};
    use crate::infrastructure::repository::InMemoryRelayRepository;
    use mockall::predicate;
    use tokio::sync::Mutex;

    fn create_test_repository() -> Arc<InMemoryRelayRepository> {
        Arc::new(InMemoryRelayRepository::new(Arc::new(Mutex::new(
            RelayState::new(),
        ))))
    }

    fn name(s: &str) -> Username {
        Username::new(s.to_string())
    }

    #[tokio::test]
    async fn test_message_is_appended_with_author() {
        // テスト項目: join 済みの送信者のメッセージが著者名付きでログに追記される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase =
            RelayMessageUseCase::new(repository.clone(), Arc::new(MockMessagePusher::new()));
        let alice = ConnectionId::new();
        repository.join(alice, name("alice")).await;

        // when (操作):
        let record = usecase.execute(alice, "Hello!".to_string()).await;

        // then (期待する結果):
        assert_eq!(record.username, Some(name("alice")));
        assert_eq!(record.text, "Hello!");
        let history = repository.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], record);
    }

    #[tokio::test]
    async fn test_message_from_unjoined_sender_has_no_author() {
        // テスト項目: 未 join の送信者のメッセージは著者なしで中継・記録される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase =
            RelayMessageUseCase::new(repository.clone(), Arc::new(MockMessagePusher::new()));

        // when (操作):
        let record = usecase
            .execute(ConnectionId::new(), "anonymous".to_string())
            .await;

        // then (期待する結果): エラーにはならず、著者なしのレコードになる
        assert_eq!(record.username, None);
        assert_eq!(repository.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_two_messages_keep_send_order_and_names() {
        // テスト項目: 2通のメッセージは送信順で追記され、それぞれ送信時点の
        // 表示名を保持する（後から再 join で上書きされても変わらない）
        // given (前提条件):
        let repository = create_test_repository();
        let usecase =
            RelayMessageUseCase::new(repository.clone(), Arc::new(MockMessagePusher::new()));
        let conn = ConnectionId::new();
        repository.join(conn, name("alice")).await;

        // when (操作):
        usecase.execute(conn, "first".to_string()).await;
        repository.join(conn, name("alicia")).await;
        usecase.execute(conn, "second".to_string()).await;

        // then (期待する結果):
        let history = repository.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "first");
        assert_eq!(history[0].username, Some(name("alice")));
        assert_eq!(history[1].text, "second");
        assert_eq!(history[1].username, Some(name("alicia")));
        assert!(history[0].timestamp <= history[1].timestamp);
    }

    #[tokio::test]
    async fn test_broadcast_to_all_delegates_to_pusher() {
        // テスト項目: ブロードキャストが送信者込みの全接続送信に委譲される
        // given (前提条件):
        let repository = create_test_repository();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast_all()
            .with(predicate::eq("frame"))
            .times(1)
            .returning(|_| Ok(()));
        let usecase = RelayMessageUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let result = usecase.broadcast_to_all("frame").await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
