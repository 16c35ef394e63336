//! Domain layer: room progress, value objects and the ports the use cases
//! depend on.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{BoardSnapshot, RoomBoard, RoomPolicy, RoomProgress};
pub use error::{MessagePushError, RoomStateError, ValueObjectError};
pub use message_pusher::{BroadcastReport, MessagePusher, PusherChannel};
pub use repository::RoomStateRepository;
pub use value_object::{ConnectionId, RoomId, Step, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
