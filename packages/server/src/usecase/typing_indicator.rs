//! UseCase: タイピング通知処理（typing イベント）
//!
//! 送信者の表示名を解決し、送信者を除く全接続へ通知する（自己エコーなし）。
//! 状態は一切変更しない。未 join の送信者からの通知も著者なしでそのまま
//! 中継される。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RelayRepository, Username};

/// タイピング通知のユースケース
pub struct TypingIndicatorUseCase {
    repository: Arc<dyn RelayRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl TypingIndicatorUseCase {
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 送信者の表示名を解決する（未 join なら None）
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<Username> {
        self.repository.resolve(&connection_id).await
    }

    /// 送信者を除く全接続へフレームをブロードキャスト
    pub async fn broadcast_to_others(
        &self,
        sender: &ConnectionId,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast_except(sender, message)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message_pusher::MockMessagePusher;
    use crate::domain::RelayState;
    use crate::infrastructure::repository::InMemoryRelayRepository;
    use mockall::predicate;
    use tokio::sync::Mutex;

    fn create_test_repository() -> Arc<InMemoryRelayRepository> {
        Arc::new(InMemoryRelayRepository::new(Arc::new(Mutex::new(
            RelayState::new(),
        ))))
    }

    #[tokio::test]
    async fn test_resolves_sender_name() {
        // テスト項目: join 済みの送信者の表示名が解決される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase =
            TypingIndicatorUseCase::new(repository.clone(), Arc::new(MockMessagePusher::new()));
        let alice = ConnectionId::new();
        repository.join(alice, Username::new("alice".to_string())).await;

        // when (操作):
        let resolved = usecase.execute(alice).await;

        // then (期待する結果):
        assert_eq!(resolved, Some(Username::new("alice".to_string())));
    }

    #[tokio::test]
    async fn test_unjoined_sender_resolves_to_none() {
        // テスト項目: 未 join の送信者は None に解決される（エラーではない）
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = TypingIndicatorUseCase::new(repository, Arc::new(MockMessagePusher::new()));

        // when (操作):
        let resolved = usecase.execute(ConnectionId::new()).await;

        // then (期待する結果):
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn test_broadcast_excludes_sender() {
        // テスト項目: タイピング通知は送信者を除外してブロードキャストされる
        // given (前提条件):
        let repository = create_test_repository();
        let sender = ConnectionId::new();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast_except()
            .with(predicate::eq(sender), predicate::eq("typing frame"))
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = TypingIndicatorUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let result = usecase.broadcast_to_others(&sender, "typing frame").await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
