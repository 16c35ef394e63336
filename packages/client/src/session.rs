//! TCP session with the leaderboard daemon.

use leaderboard_shared::protocol::{Message, decode, encode};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::mpsc,
};

use crate::{
    domain::parse_step,
    error::ClientError,
    formatter::LeaderboardFormatter,
    ui::{redisplay_prompt, render_state},
};

/// Receiving end of the terminal input thread.
pub type InputReceiver = mpsc::UnboundedReceiver<String>;

/// Start the blocking line editor on its own thread.
///
/// Lines are forwarded through the returned channel. The channel closes when
/// the game master presses Ctrl+C or Ctrl+D, which ends the client.
pub fn spawn_input_thread(room: &str) -> InputReceiver {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = LeaderboardFormatter::format_prompt(room);

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run one connection to the daemon.
///
/// Returns `Ok(())` when the input channel closes (user exit) and an error
/// when the connection fails or is lost.
pub async fn run_client_session(
    addr: &str,
    room: &str,
    input_rx: &mut InputReceiver,
) -> Result<(), ClientError> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| ClientError::Connection(format!("{}: {}", addr, e)))?;
    tracing::info!("Connected to leaderboard daemon at {}", addr);

    let (reader, mut writer) = stream.into_split();
    let mut read_task = tokio::spawn(read_loop(reader, room.to_string()));

    let outcome = loop {
        tokio::select! {
            result = &mut read_task => {
                break match result {
                    Ok(inner) => inner,
                    Err(e) => Err(ClientError::Connection(format!("reader task failed: {}", e))),
                };
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    tracing::info!("Input closed, leaving");
                    read_task.abort();
                    break Ok(());
                };
                match parse_step(&line) {
                    Ok(step) => {
                        if let Err(e) = send_step(&mut writer, room, step).await {
                            read_task.abort();
                            break Err(e);
                        }
                        tracing::debug!("Sent step {} for room {}", step, room);
                    }
                    Err(e) => {
                        tracing::debug!("{}", e);
                        print!("{}", LeaderboardFormatter::format_invalid_input());
                        redisplay_prompt(room);
                    }
                }
            }
        }
    };

    writer.shutdown().await.ok();
    outcome
}

async fn send_step(writer: &mut OwnedWriteHalf, room: &str, step: u64) -> Result<(), ClientError> {
    let encoded = encode(&Message::progress_update(room, step))?;
    writer.write_all(encoded.as_bytes()).await?;
    Ok(())
}

/// Render every `state` line until the daemon closes the connection.
async fn read_loop(reader: OwnedReadHalf, room: String) -> Result<(), ClientError> {
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        match decode(&line)? {
            Message::State(state) => render_state(&state, &room),
            Message::ProgressUpdate(update) => {
                tracing::warn!("Ignoring unexpected progress_update for room {}", update.room);
            }
        }
    }

    Err(ClientError::Connection(
        "connection closed by daemon".to_string(),
    ))
}
