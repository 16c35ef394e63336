//! State shared by every connection handler.

use std::sync::Arc;

use crate::usecase::{ApplyProgressUseCase, ConnectClientUseCase, DisconnectClientUseCase};

/// Shared application state
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub apply_progress_usecase: Arc<ApplyProgressUseCase>,
}
