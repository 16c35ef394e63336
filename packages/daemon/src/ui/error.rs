//! Transport-level error types.

use leaderboard_shared::protocol::DecodeError;
use thiserror::Error;

/// Fatal daemon errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Startup {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read the listening address: {0}")]
    LocalAddr(#[source] std::io::Error),
}

/// Errors that end a single connection
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}
