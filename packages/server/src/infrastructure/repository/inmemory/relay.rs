//! In-memory RelayRepository implementation.
//!
//! The session registry and the message log are the relay's only shared
//! mutable state. Both live inside one `RelayState` behind a single mutex, so
//! each repository operation runs as one critical section: mutation plus the
//! snapshot its caller needs. That single serializing owner is what keeps
//! concurrent per-connection tasks from interleaving their effects.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, JoinSnapshot, LeaveSnapshot, RelayRepository, RelayState, Timestamp, UserMessage,
    Username,
};

/// In-memory relay repository
pub struct InMemoryRelayRepository {
    state: Arc<Mutex<RelayState>>,
}

impl InMemoryRelayRepository {
    pub fn new(state: Arc<Mutex<RelayState>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl RelayRepository for InMemoryRelayRepository {
    async fn join(&self, connection_id: ConnectionId, name: Username) -> JoinSnapshot {
        let mut state = self.state.lock().await;
        state.registry.join(connection_id, name);
        JoinSnapshot {
            names: state.registry.names(),
            history: state.log.snapshot(),
        }
    }

    async fn resolve(&self, connection_id: &ConnectionId) -> Option<Username> {
        let state = self.state.lock().await;
        state.registry.resolve(connection_id)
    }

    async fn leave(&self, connection_id: &ConnectionId) -> Option<LeaveSnapshot> {
        let mut state = self.state.lock().await;
        let name = state.registry.leave(connection_id)?;
        Some(LeaveSnapshot {
            name,
            names: state.registry.names(),
        })
    }

    async fn append_user_message(
        &self,
        connection_id: &ConnectionId,
        text: String,
        timestamp: Timestamp,
    ) -> UserMessage {
        let mut state = self.state.lock().await;
        let record = UserMessage::new(state.registry.resolve(connection_id), text, timestamp);
        state.log.append(record.clone());
        record
    }

    async fn history(&self) -> Vec<UserMessage> {
        let state = self.state.lock().await;
        state.log.snapshot()
    }

    async fn count_sessions(&self) -> usize {
        let state = self.state.lock().await;
        state.registry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_repository() -> InMemoryRelayRepository {
        InMemoryRelayRepository::new(Arc::new(Mutex::new(RelayState::new())))
    }

    fn name(s: &str) -> Username {
        Username::new(s.to_string())
    }

    #[tokio::test]
    async fn test_join_returns_snapshot_including_joiner() {
        // テスト項目: join のスナップショットには参加者自身の名前が含まれる
        // given (前提条件):
        let repo = create_test_repository();
        repo.join(ConnectionId::new(), name("alice")).await;

        // when (操作):
        let snapshot = repo.join(ConnectionId::new(), name("bob")).await;

        // then (期待する結果):
        assert_eq!(snapshot.names, vec![name("alice"), name("bob")]);
        assert!(snapshot.history.is_empty());
    }

    #[tokio::test]
    async fn test_join_snapshot_contains_history_at_join_time() {
        // テスト項目: join のスナップショットには join 時点の履歴が含まれる
        // given (前提条件):
        let repo = create_test_repository();
        let alice = ConnectionId::new();
        repo.join(alice, name("alice")).await;
        repo.append_user_message(&alice, "first".to_string(), Timestamp::new(1000))
            .await;
        repo.append_user_message(&alice, "second".to_string(), Timestamp::new(2000))
            .await;

        // when (操作):
        let snapshot = repo.join(ConnectionId::new(), name("bob")).await;

        // then (期待する結果):
        assert_eq!(snapshot.history.len(), 2);
        assert_eq!(snapshot.history[0].text, "first");
        assert_eq!(snapshot.history[1].text, "second");
    }

    #[tokio::test]
    async fn test_leave_returns_name_and_remaining() {
        // テスト項目: leave は退出者の名前と残りの参加者リストを返す
        // given (前提条件):
        let repo = create_test_repository();
        let alice = ConnectionId::new();
        repo.join(alice, name("alice")).await;
        repo.join(ConnectionId::new(), name("bob")).await;

        // when (操作):
        let snapshot = repo.leave(&alice).await;

        // then (期待する結果):
        let snapshot = snapshot.unwrap();
        assert_eq!(snapshot.name, name("alice"));
        assert_eq!(snapshot.names, vec![name("bob")]);
        assert_eq!(repo.count_sessions().await, 1);
    }

    #[tokio::test]
    async fn test_leave_unjoined_connection_is_none() {
        // テスト項目: join していない接続の leave は None を返す
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let snapshot = repo.leave(&ConnectionId::new()).await;

        // then (期待する結果):
        assert!(snapshot.is_none());
    }

    #[tokio::test]
    async fn test_append_resolves_author_at_send_time() {
        // テスト項目: レコードの著者名は送信時点の登録名のスナップショットになる
        // given (前提条件):
        let repo = create_test_repository();
        let alice = ConnectionId::new();
        repo.join(alice, name("alice")).await;

        // when (操作): 送信後に同じ接続が別名で再 join する
        let record = repo
            .append_user_message(&alice, "hi".to_string(), Timestamp::new(1000))
            .await;
        repo.join(alice, name("alicia")).await;

        // then (期待する結果): 既存レコードは元の名前を保持する
        assert_eq!(record.username, Some(name("alice")));
        assert_eq!(repo.history().await[0].username, Some(name("alice")));
    }

    #[tokio::test]
    async fn test_append_from_unjoined_sender_has_absent_author() {
        // テスト項目: 未 join の送信者のレコードは著者名なしで記録される
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let record = repo
            .append_user_message(&ConnectionId::new(), "anon".to_string(), Timestamp::new(0))
            .await;

        // then (期待する結果):
        assert_eq!(record.username, None);
        assert_eq!(repo.history().await.len(), 1);
    }
}
