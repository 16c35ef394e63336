//! TCP connection handler.
//!
//! Per connection:
//! `CONNECTED -> READING -> (decoded -> applied -> broadcast -> READING)`
//! until EOF, a decode error or a transport error, then `CLOSING -> CLOSED`.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use leaderboard_shared::protocol::{self, Message, ProgressUpdate};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::mpsc,
    task::JoinHandle,
};

use crate::{
    domain::{ConnectionId, RoomId, Step},
    ui::{error::ConnectionError, state::AppState},
    usecase::ApplyProgressError,
};

/// How long a peer that closed its side gets to receive its queued lines.
const FLUSH_GRACE: Duration = Duration::from_secs(1);

/// Serve one accepted connection until it closes.
///
/// Every error is handled here; nothing propagates to the accept loop.
pub async fn handle_connection(stream: TcpStream, peer: SocketAddr, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (reader, writer) = stream.into_split();
    let (tx, rx) = mpsc::unbounded_channel();

    if let Err(e) = state
        .connect_client_usecase
        .execute(connection_id, tx)
        .await
    {
        tracing::error!("Failed to register connection from {}: {}", peer, e);
        state.disconnect_client_usecase.execute(&connection_id).await;
        return;
    }
    tracing::info!("Client connected from {} as '{}'", peer, connection_id);

    let mut send_task = pusher_loop(rx, writer);

    let state_for_read = state.clone();
    let mut recv_task =
        tokio::spawn(async move { read_loop(reader, &state_for_read, connection_id).await });

    // If any one of the tasks completes, stop the other. A clean EOF from the
    // peer still flushes whatever is queued for it.
    let outcome = tokio::select! {
        result = &mut recv_task => {
            if matches!(result, Ok(Ok(()))) {
                flush_and_close(&state, connection_id, &mut send_task).await;
            } else {
                send_task.abort();
            }
            result
        }
        result = &mut send_task => {
            recv_task.abort();
            result
        }
    };

    match outcome {
        Ok(Ok(())) => {
            tracing::info!("Connection '{}' ({}) closed", connection_id, peer);
        }
        Ok(Err(ConnectionError::Decode(e))) => {
            tracing::warn!(
                "Closing connection '{}' ({}) after undecodable line: {}",
                connection_id,
                peer,
                e
            );
        }
        Ok(Err(e)) => {
            tracing::warn!("Connection '{}' ({}) failed: {}", connection_id, peer, e);
        }
        Err(e) => {
            tracing::error!("Connection task for '{}' ended abnormally: {}", connection_id, e);
        }
    }

    state.disconnect_client_usecase.execute(&connection_id).await;
    tracing::info!("Client disconnected from {}", peer);
}

/// Close the connection's queue and give the writer time to write what is
/// already in it.
async fn flush_and_close(
    state: &AppState,
    connection_id: ConnectionId,
    send_task: &mut JoinHandle<Result<(), ConnectionError>>,
) {
    // the registry holds the only sender, so this closes the queue
    state.disconnect_client_usecase.execute(&connection_id).await;

    match tokio::time::timeout(FLUSH_GRACE, &mut *send_task).await {
        Ok(Ok(Err(e))) => {
            tracing::debug!("Flushing '{}' failed: {}", connection_id, e);
        }
        Ok(_) => {}
        Err(_) => {
            tracing::warn!("Connection '{}' did not flush in time", connection_id);
            send_task.abort();
        }
    }
}

/// Drain the connection's outbound queue into the socket.
///
/// Ends when the queue is closed (unregistered) or a write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut writer: OwnedWriteHalf,
) -> JoinHandle<Result<(), ConnectionError>> {
    tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
        }
        // queue closed: flush the FIN so the peer sees EOF
        let _ = writer.shutdown().await;
        Ok(())
    })
}

async fn read_loop(
    reader: OwnedReadHalf,
    state: &AppState,
    connection_id: ConnectionId,
) -> Result<(), ConnectionError> {
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(());
        }
        tracing::debug!(
            "Received from '{}': {}",
            connection_id,
            String::from_utf8_lossy(&line).trim_end()
        );

        match protocol::decode_bytes(&line)? {
            Message::ProgressUpdate(update) => apply_update(state, connection_id, update).await,
            Message::State(_) => {
                tracing::debug!("Ignoring state message sent by '{}'", connection_id);
            }
        }
    }
}

async fn apply_update(state: &AppState, connection_id: ConnectionId, update: ProgressUpdate) {
    let step = Step::new(update.step);
    let room = match RoomId::try_from(update.room) {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!("Ignoring update from '{}': {}", connection_id, e);
            return;
        }
    };

    match state
        .apply_progress_usecase
        .execute(room.clone(), step)
        .await
    {
        Ok(report) => {
            tracing::info!(
                "Room '{}' is at step {}; state sent to {} connection(s)",
                room,
                step.value(),
                report.delivered
            );
        }
        Err(ApplyProgressError::Rejected(e)) => {
            tracing::warn!("Rejected update from '{}': {}", connection_id, e);
        }
        Err(e) => {
            tracing::error!("Failed to apply update from '{}': {}", connection_id, e);
        }
    }
}
