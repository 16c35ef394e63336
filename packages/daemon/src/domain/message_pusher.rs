//! MessagePusher trait: delivery of encoded lines to connected clients.
//!
//! Each connection owns an outbound queue; the pusher only enqueues, so a
//! slow client can never block delivery to the others.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// Outbound queue of one connection
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Result of one broadcast pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Number of connections the line was enqueued for
    pub delivered: usize,
    /// Connections whose queue was closed; they have been unregistered
    pub dropped: Vec<ConnectionId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection's outbound queue.
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Remove a connection. Returns `false` when it was not registered.
    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool;

    /// Enqueue `content` for a single connection.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Enqueue `content` for every registered connection.
    ///
    /// Failures never abort the pass; failed connections are collected and
    /// unregistered once every recipient has been tried.
    async fn broadcast(&self, content: &str) -> BroadcastReport;

    /// Unregister every connection, closing their queues. Returns how many
    /// were registered.
    async fn disconnect_all(&self) -> usize;
}
