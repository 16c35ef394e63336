//! Error types for the room client.

use leaderboard_shared::protocol::{DecodeError, EncodeError};
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connecting failed or the daemon went away
    #[error("Connection error: {0}")]
    Connection(String),

    /// Reading from or writing to the socket failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The daemon sent a line this client cannot understand
    #[error("Protocol error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Protocol error: {0}")]
    Encode(#[from] EncodeError),

    /// The typed step is not a non-negative integer
    #[error("Invalid step '{0}'")]
    InvalidStep(String),
}
