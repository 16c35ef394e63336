//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room id must not be empty")]
    RoomIdEmpty,

    #[error("room id is {0} bytes long, the limit is {limit}", limit = super::value_object::MAX_ROOM_ID_LEN)]
    RoomIdTooLong(usize),
}

/// Errors raised by the room state store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomStateError {
    /// The store only accepts its seeded rooms and this one is not among them.
    #[error("room '{0}' is not a known room")]
    UnknownRoom(String),
}

/// Errors raised while pushing to a single connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' is not registered")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
