//! UseCase layer.

mod apply_progress;
mod connect_client;
mod disconnect_client;
mod error;
mod sequencer;

pub use apply_progress::ApplyProgressUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ApplyProgressError, ConnectError};
pub use sequencer::BroadcastSequencer;
