//! In-process daemon and raw TCP clients for integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use leaderboard_daemon::{DaemonConfig, build_server};
use leaderboard_shared::{
    protocol::{Message, StateMessage, decode, encode},
    time::SystemClock,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, Lines},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::oneshot,
    task::JoinHandle,
};

/// Upper bound for any single read in the tests.
pub const READ_TIMEOUT: Duration = Duration::from_secs(3);

/// Daemon running on an ephemeral loopback port
pub struct TestDaemon {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestDaemon {
    /// Start a daemon seeded with rooms A and B.
    pub async fn start() -> Self {
        Self::start_with(DaemonConfig::default()).await
    }

    pub async fn start_with(config: DaemonConfig) -> Self {
        let server = build_server(&config, Arc::new(SystemClock))
            .bind("127.0.0.1", 0)
            .await
            .expect("bind ephemeral test port");
        let addr = server.local_addr().expect("get local addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            server
                .serve(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    /// Trigger shutdown and wait for the daemon to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        tokio::time::timeout(Duration::from_secs(5), &mut self.handle)
            .await
            .expect("daemon should stop in time")
            .expect("daemon task should not panic");
    }
}

/// Raw line-oriented client
pub struct TestClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    /// Connect and consume the greeting snapshot, which guarantees the
    /// connection is registered before the test continues.
    pub async fn connect(addr: SocketAddr) -> (Self, StateMessage) {
        let stream = TcpStream::connect(addr).await.expect("connect to daemon");
        let (reader, writer) = stream.into_split();
        let mut client = Self {
            lines: BufReader::new(reader).lines(),
            writer,
        };
        let greeting = client.recv_state().await;
        (client, greeting)
    }

    pub async fn send(&mut self, message: &Message) {
        let line = encode(message).expect("encode message");
        self.send_raw(&line).await;
    }

    pub async fn send_progress(&mut self, room: &str, step: u64) {
        self.send(&Message::progress_update(room, step)).await;
    }

    pub async fn send_raw(&mut self, raw: &str) {
        self.send_bytes(raw.as_bytes()).await;
    }

    pub async fn send_bytes(&mut self, raw: &[u8]) {
        self.writer.write_all(raw).await.expect("write to daemon");
    }

    /// Read the next line as a `state` message.
    pub async fn recv_state(&mut self) -> StateMessage {
        let line = tokio::time::timeout(READ_TIMEOUT, self.lines.next_line())
            .await
            .expect("timed out waiting for a line")
            .expect("read from daemon")
            .expect("connection closed unexpectedly");
        match decode(&line).expect("daemon sent an undecodable line") {
            Message::State(state) => state,
            other => panic!("expected a state message, got {:?}", other),
        }
    }

    /// True if nothing arrives within `wait`.
    pub async fn is_silent_for(&mut self, wait: Duration) -> bool {
        tokio::time::timeout(wait, self.lines.next_line())
            .await
            .is_err()
    }

    /// Wait until the daemon closes the connection (EOF or reset).
    pub async fn expect_closed(&mut self) {
        let next = tokio::time::timeout(READ_TIMEOUT, self.lines.next_line())
            .await
            .expect("timed out waiting for the daemon to close the connection");
        match next {
            Ok(None) | Err(_) => {}
            Ok(Some(line)) => panic!("expected the connection to close, got {}", line),
        }
    }

    /// Drop the connection with a TCP reset instead of a FIN.
    #[allow(deprecated)]
    pub fn reset(self) {
        let reader = self.lines.into_inner().into_inner();
        let stream = reader
            .reunite(self.writer)
            .expect("halves of the same stream");
        stream
            .set_linger(Some(Duration::ZERO))
            .expect("set SO_LINGER");
        drop(stream);
    }
}

/// Connect, send one message, close the write side and collect every
/// `state` line the daemon sends before it closes the connection.
pub async fn send_then_half_close(addr: SocketAddr, message: &Message) -> Vec<StateMessage> {
    let mut stream = TcpStream::connect(addr).await.expect("connect to daemon");
    let line = encode(message).expect("encode message");
    stream
        .write_all(line.as_bytes())
        .await
        .expect("write to daemon");
    stream.shutdown().await.expect("close the write side");

    let mut received = String::new();
    tokio::time::timeout(READ_TIMEOUT, stream.read_to_string(&mut received))
        .await
        .expect("timed out waiting for the daemon to close the connection")
        .expect("read from daemon");

    received
        .lines()
        .map(|line| match decode(line).expect("daemon sent an undecodable line") {
            Message::State(state) => state,
            other => panic!("expected a state message, got {:?}", other),
        })
        .collect()
}
