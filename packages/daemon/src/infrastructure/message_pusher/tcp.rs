//! MessagePusher over per-connection TCP writer queues.
//!
//! Each accepted socket gets a writer task (see `ui::handler::connection`)
//! that drains an unbounded queue into the socket. This pusher only manages
//! the queue senders: enqueueing never waits on the network, and a queue
//! whose writer has gone away shows up as a send error.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{BroadcastReport, ConnectionId, MessagePushError, MessagePusher, PusherChannel};

use super::registry::ConnectionRegistry;

/// TCP implementation of [`MessagePusher`]
pub struct TcpMessagePusher {
    registry: Arc<ConnectionRegistry>,
}

impl TcpMessagePusher {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl MessagePusher for TcpMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.registry.register(connection_id, sender).await;
        tracing::debug!(
            "Connection '{}' registered to MessagePusher ({} connected)",
            connection_id,
            self.registry.len().await
        );
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool {
        let removed = self.registry.unregister(connection_id).await;
        if removed {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
        removed
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let sender = self
            .registry
            .get(connection_id)
            .await
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;

        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, content: &str) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        self.registry
            .for_each(|connection_id, sender| {
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!(
                        "Failed to push message to connection '{}': {}",
                        connection_id,
                        e
                    );
                    report.dropped.push(*connection_id);
                } else {
                    report.delivered += 1;
                }
            })
            .await;

        // second phase: drop the dead queues only after everyone was tried
        for connection_id in &report.dropped {
            self.registry.unregister(connection_id).await;
        }

        tracing::debug!(
            "Broadcast delivered to {} connection(s), dropped {}",
            report.delivered,
            report.dropped.len()
        );
        report
    }

    async fn disconnect_all(&self) -> usize {
        self.registry.drain().await.len()
    }
}
