//! Repository trait for the room state store.
//!
//! The use case layer depends on this trait only; the in-memory
//! implementation lives in the infrastructure layer.

use async_trait::async_trait;

use super::{BoardSnapshot, RoomId, RoomStateError, Step};

/// Room state repository
#[async_trait]
pub trait RoomStateRepository: Send + Sync {
    /// Overwrite the step of `room`, stamping it with the current time.
    async fn update(&self, room: RoomId, step: Step) -> Result<(), RoomStateError>;

    /// Owned copy of every room's progress.
    async fn snapshot(&self) -> BoardSnapshot;
}
