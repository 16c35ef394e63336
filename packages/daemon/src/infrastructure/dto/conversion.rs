//! Conversion between domain snapshots and wire DTOs.

use leaderboard_shared::{
    protocol::{self, EncodeError, Message, RoomStateInfo, StateMessage},
    time::timestamp_to_rfc3339,
};

use crate::domain::{BoardSnapshot, RoomProgress};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<RoomProgress> for RoomStateInfo {
    fn from(progress: RoomProgress) -> Self {
        Self {
            step: progress.step.value(),
            last_updated: progress
                .last_updated
                .and_then(|at| timestamp_to_rfc3339(at.value())),
        }
    }
}

impl From<BoardSnapshot> for StateMessage {
    fn from(snapshot: BoardSnapshot) -> Self {
        Self {
            data: snapshot
                .into_iter()
                .map(|(room, progress)| (room.into_string(), progress.into()))
                .collect(),
        }
    }
}

/// Encode a snapshot as one `state` line, newline included.
pub fn encode_snapshot(snapshot: BoardSnapshot) -> Result<String, EncodeError> {
    protocol::encode(&Message::State(snapshot.into()))
}
