//! Serialization point for store mutations and broadcasts.
//!
//! Holding the guard across update → snapshot → enqueue keeps every
//! connection's queue in the order the updates were applied.

use tokio::sync::{Mutex, MutexGuard};

/// Broadcast sequencer; the guarded value counts issued snapshots.
#[derive(Debug, Default)]
pub struct BroadcastSequencer {
    issued: Mutex<u64>,
}

impl BroadcastSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access. Increment the guarded counter for every
    /// snapshot enqueued while holding it.
    pub async fn enter(&self) -> MutexGuard<'_, u64> {
        self.issued.lock().await
    }

    /// Number of snapshots issued so far.
    #[cfg(test)]
    pub async fn issued(&self) -> u64 {
        *self.issued.lock().await
    }
}
