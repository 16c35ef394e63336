//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::{run_client_session, spawn_input_thread},
};

pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
pub const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the room client with reconnection logic
///
/// Returns the last error once reconnecting is pointless or the attempts
/// are used up.
pub async fn run_client(host: &str, port: u16, room: &str) -> Result<(), ClientError> {
    let addr = format!("{}:{}", host, port);
    let mut input_rx = spawn_input_thread(room);
    let mut reconnect_count = 0;

    loop {
        tracing::info!("Attempting to connect to {} as room '{}'", addr, room);

        match run_client_session(&addr, room, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}", e);
                    return Err(e);
                }

                tracing::warn!("Connection lost: {}", e);
                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }
                reconnect_count += 1;

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count,
                    MAX_RECONNECT_ATTEMPTS
                );
                eprintln!(
                    "Connection lost. Reconnecting in {}s ({}/{})...",
                    RECONNECT_INTERVAL_SECS, reconnect_count, MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
