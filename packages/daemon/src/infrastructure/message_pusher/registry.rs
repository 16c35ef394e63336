//! Connection registry: the set of open connections and their outbound queues.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PusherChannel};

/// Set of currently open connections
#[derive(Default)]
pub struct ConnectionRegistry {
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection. A second registration replaces the queue.
    pub async fn register(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.clients.lock().await.insert(connection_id, sender);
    }

    /// Remove a connection. Removing an unknown id is a no-op.
    pub async fn unregister(&self, connection_id: &ConnectionId) -> bool {
        self.clients.lock().await.remove(connection_id).is_some()
    }

    pub async fn get(&self, connection_id: &ConnectionId) -> Option<PusherChannel> {
        self.clients.lock().await.get(connection_id).cloned()
    }

    /// Call `f` for every connection registered when the call started.
    ///
    /// The lock is released before `f` runs, so `f` may not observe
    /// registrations made concurrently, but it sees every entry exactly once.
    pub async fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&ConnectionId, &PusherChannel),
    {
        let entries: Vec<(ConnectionId, PusherChannel)> = {
            let clients = self.clients.lock().await;
            clients
                .iter()
                .map(|(id, sender)| (*id, sender.clone()))
                .collect()
        };

        for (id, sender) in &entries {
            f(id, sender);
        }
    }

    #[cfg(test)]
    pub async fn ids(&self) -> Vec<ConnectionId> {
        self.clients.lock().await.keys().copied().collect()
    }

    pub async fn len(&self) -> usize {
        self.clients.lock().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.clients.lock().await.is_empty()
    }

    /// Remove every connection, returning their ids.
    pub async fn drain(&self) -> Vec<ConnectionId> {
        self.clients
            .lock()
            .await
            .drain()
            .map(|(id, _)| id)
            .collect()
    }
}
