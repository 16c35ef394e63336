//! `MessagePusher` implementations
//!
//! - `registry`: the set of open connections
//! - `tcp`: pusher feeding per-connection TCP writer queues

pub mod registry;
pub mod tcp;

pub use registry::ConnectionRegistry;
pub use tcp::TcpMessagePusher;
