//! UseCase error types.

use leaderboard_shared::protocol::EncodeError;
use thiserror::Error;

use crate::domain::{MessagePushError, RoomStateError};

/// Errors of `ApplyProgressUseCase`
#[derive(Debug, Error)]
pub enum ApplyProgressError {
    #[error(transparent)]
    Rejected(#[from] RoomStateError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Errors of `ConnectClientUseCase`
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("failed to send the greeting snapshot: {0}")]
    Greeting(#[from] MessagePushError),
}
