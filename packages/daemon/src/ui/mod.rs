//! TCP daemon: accept loop, connection handling and shutdown.

pub mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use error::{ConnectionError, DaemonError};
pub use server::{BoundServer, Server};
pub use signal::shutdown_signal;
