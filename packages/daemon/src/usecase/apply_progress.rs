//! UseCase: apply a progress update and broadcast the new state
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ApplyProgressUseCase::execute() メソッド
//! - ルーム状態の更新と、更新後のスナップショットのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 更新 U の後に発行されたブロードキャストが U を含むことを保証する
//! - 拒否された更新がブロードキャストされないことを確認する
//! - 並行して更新されてもブロードキャストの順序が入れ替わらないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：既知のルームの更新
//! - 異常系：Fixed ポリシーでの未知のルーム
//! - エッジケース：多数の並行更新

use std::sync::Arc;

use crate::{
    domain::{BroadcastReport, MessagePusher, RoomId, RoomStateRepository, Step},
    infrastructure::dto::encode_snapshot,
};

use super::{error::ApplyProgressError, sequencer::BroadcastSequencer};

/// UseCase for `progress_update` messages
pub struct ApplyProgressUseCase {
    repository: Arc<dyn RoomStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<BroadcastSequencer>,
}

impl ApplyProgressUseCase {
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

    /// Store `step` for `room`, then broadcast the full state to every
    /// registered connection.
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - how many connections got the snapshot
    /// * `Err(ApplyProgressError)` - the update was rejected; nothing was broadcast
    pub async fn execute(
        &self,
        room: RoomId,
        step: Step,
    ) -> Result<BroadcastReport, ApplyProgressError> {
        let mut issued = self.sequencer.enter().await;

        self.repository.update(room.clone(), step).await?;
        let snapshot = self.repository.snapshot().await;
        let line = encode_snapshot(snapshot)?;

        *issued += 1;
        let report = self.message_pusher.broadcast(&line).await;
        tracing::debug!(
            "Snapshot #{} after room '{}' reached step {}",
            *issued,
            room,
            step.value()
        );

        Ok(report)
    }
}
