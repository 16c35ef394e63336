//! In-memory room state repository.
//!
//! Holds the `RoomBoard` behind a mutex and stamps updates with the injected
//! clock. Nothing survives a restart.

use std::sync::Arc;

use async_trait::async_trait;
use leaderboard_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    BoardSnapshot, RoomBoard, RoomId, RoomStateError, RoomStateRepository, Step, Timestamp,
};

/// In-memory implementation of [`RoomStateRepository`]
pub struct InMemoryRoomStateRepository {
    board: Mutex<RoomBoard>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomStateRepository {
    pub fn new(board: RoomBoard, clock: Arc<dyn Clock>) -> Self {
        Self {
            board: Mutex::new(board),
            clock,
        }
    }
}

#[async_trait]
impl RoomStateRepository for InMemoryRoomStateRepository {
    async fn update(&self, room: RoomId, step: Step) -> Result<(), RoomStateError> {
        let now = Timestamp::new(self.clock.now_millis());
        let mut board = self.board.lock().await;
        board.update(room, step, now)
    }

    async fn snapshot(&self) -> BoardSnapshot {
        self.board.lock().await.snapshot()
    }
}
