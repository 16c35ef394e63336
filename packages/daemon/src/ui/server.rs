//! Daemon accept loop and shutdown.

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use tokio::{net::TcpListener, task::JoinSet};

use crate::usecase::{ApplyProgressUseCase, ConnectClientUseCase, DisconnectClientUseCase};

use super::{
    error::DaemonError, handler::handle_connection, signal::shutdown_signal, state::AppState,
};

/// How long shutdown waits for connection tasks to flush and exit.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Leaderboard broadcast daemon
///
/// # Example
///
/// ```ignore
/// let server = Server::new(connect_client_usecase, disconnect_client_usecase, apply_progress_usecase);
/// server.run("127.0.0.1", 5000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        apply_progress_usecase: Arc<ApplyProgressUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_client_usecase,
                disconnect_client_usecase,
                apply_progress_usecase,
            }),
        }
    }

    /// Bind the listening socket.
    ///
    /// # Errors
    ///
    /// Returns `DaemonError::Startup` if the address cannot be bound.
    pub async fn bind(self, host: &str, port: u16) -> Result<BoundServer, DaemonError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| DaemonError::Startup {
                addr: bind_addr.clone(),
                source,
            })?;

        Ok(BoundServer {
            listener,
            state: self.state,
        })
    }

    /// Bind and serve until Ctrl+C or SIGTERM.
    pub async fn run(self, host: &str, port: u16) -> Result<(), DaemonError> {
        let server = self.bind(host, port).await?;
        tracing::info!("Daemon listening on {}", server.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        server.serve(shutdown_signal()).await;
        tracing::info!("Daemon shutdown complete");
        Ok(())
    }
}

/// A daemon whose socket is bound but not yet accepting
pub struct BoundServer {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl BoundServer {
    pub fn local_addr(&self) -> Result<SocketAddr, DaemonError> {
        self.listener.local_addr().map_err(DaemonError::LocalAddr)
    }

    /// Accept connections until `shutdown` resolves, then close every
    /// registered connection.
    pub async fn serve<F>(self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        connections.spawn(handle_connection(stream, peer, self.state.clone()));
                    }
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                    }
                },
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        drop(self.listener);
        let closed = self.state.disconnect_client_usecase.execute_all().await;
        tracing::info!("Closing {} client connection(s)", closed);

        let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
            while connections.join_next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            tracing::warn!(
                "{} connection(s) did not close in time, aborting",
                connections.len()
            );
            connections.abort_all();
        }
    }
}
