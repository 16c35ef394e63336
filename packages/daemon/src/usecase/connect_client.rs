//! UseCase: register a new connection and greet it with the current state
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続の登録と、現在の状態（グリーティング）の送信
//!
//! ### なぜこのテストが必要か
//! - 新しいクライアントが最初の更新を待たずに表示できることを保証する
//! - グリーティングが他の接続に送られないことを確認する

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, MessagePusher, PusherChannel, RoomStateRepository},
    infrastructure::dto::encode_snapshot,
};

use super::{error::ConnectError, sequencer::BroadcastSequencer};

/// UseCase for accepted connections
pub struct ConnectClientUseCase {
    repository: Arc<dyn RoomStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<BroadcastSequencer>,
}

impl ConnectClientUseCase {
    pub fn new(
        repository: Arc<dyn RoomStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<BroadcastSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// Register `sender` as the outbound queue of `connection_id` and enqueue
    /// the current snapshot on it.
    ///
    /// Registration and greeting happen under the sequencer, so the greeting
    /// is never newer than a broadcast queued after it.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), ConnectError> {
        let _issued = self.sequencer.enter().await;

        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        let line = encode_snapshot(self.repository.snapshot().await)?;
        self.message_pusher.push_to(&connection_id, &line).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RoomBoard, RoomId, RoomPolicy},
        infrastructure::{
            message_pusher::{ConnectionRegistry, TcpMessagePusher},
            repository::InMemoryRoomStateRepository,
        },
    };
    use leaderboard_shared::{
        protocol::{Message, decode},
        time::SystemClock,
    };
    use tokio::sync::mpsc;

    fn create_usecase() -> (ConnectClientUseCase, Arc<ConnectionRegistry>) {
        let board = RoomBoard::new(
            ["A", "B"].map(|id| RoomId::try_from(id).unwrap()),
            RoomPolicy::Permissive,
        );
        let repository = Arc::new(InMemoryRoomStateRepository::new(
            board,
            Arc::new(SystemClock),
        ));
        let registry = Arc::new(ConnectionRegistry::new());
        let usecase = ConnectClientUseCase::new(
            repository,
            Arc::new(TcpMessagePusher::new(registry.clone())),
            Arc::new(BroadcastSequencer::new()),
        );
        (usecase, registry)
    }

    #[tokio::test]
    async fn test_connect_registers_and_greets() {
        // テスト項目: 接続が登録され、現在の状態が送信される
        // given (前提条件):
        let (usecase, registry) = create_usecase();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = ConnectionId::generate();

        // when (操作):
        let result = usecase.execute(id, tx).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(registry.ids().await, vec![id]);
        let greeting = rx.recv().await.unwrap();
        let Message::State(state) = decode(&greeting).unwrap() else {
            panic!("expected a state message");
        };
        assert_eq!(state.step_of("A"), Some(0));
        assert_eq!(state.step_of("B"), Some(0));
    }

    #[tokio::test]
    async fn test_greeting_goes_only_to_new_connection() {
        // テスト項目: グリーティングは既存の接続には送信されない
        // given (前提条件):
        let (usecase, _registry) = create_usecase();
        let (first_tx, mut first_rx) = mpsc::unbounded_channel();
        usecase
            .execute(ConnectionId::generate(), first_tx)
            .await
            .unwrap();
        first_rx.recv().await.unwrap();

        // when (操作):
        let (second_tx, mut second_rx) = mpsc::unbounded_channel();
        usecase
            .execute(ConnectionId::generate(), second_tx)
            .await
            .unwrap();

        // then (期待する結果):
        assert!(second_rx.recv().await.is_some());
        assert!(first_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_connect_with_closed_queue_fails() {
        // テスト項目: 受信側が閉じたキューで接続するとグリーティング送信エラーになる
        // given (前提条件):
        let (usecase, _registry) = create_usecase();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        // when (操作):
        let result = usecase.execute(ConnectionId::generate(), tx).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ConnectError::Greeting(_))));
    }
}
