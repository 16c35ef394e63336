//! UseCase: forget a connection
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() と execute_all()
//!
//! ### なぜこのテストが必要か
//! - 切断処理は読み込みループと書き込みタスクの両方から呼ばれ得るため、冪等である必要がある
//! - シャットダウン時に全ての接続が閉じられることを保証する

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// UseCase for closed connections and daemon shutdown
pub struct DisconnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Unregister one connection. Returns `false` when it was already gone.
    pub async fn execute(&self, connection_id: &ConnectionId) -> bool {
        self.message_pusher.unregister_client(connection_id).await
    }

    /// Unregister every connection, closing their outbound queues.
    pub async fn execute_all(&self) -> usize {
        self.message_pusher.disconnect_all().await
    }
}
