//! Dependency wiring.

use std::sync::Arc;

use leaderboard_shared::time::Clock;

use crate::{
    config::DaemonConfig,
    domain::RoomBoard,
    infrastructure::{
        message_pusher::{ConnectionRegistry, TcpMessagePusher},
        repository::InMemoryRoomStateRepository,
    },
    ui::Server,
    usecase::{
        ApplyProgressUseCase, BroadcastSequencer, ConnectClientUseCase, DisconnectClientUseCase,
    },
};

/// Build a daemon from `config`.
///
/// Dependencies are created in order:
/// 1. Repository
/// 2. MessagePusher
/// 3. UseCases
/// 4. Server
pub fn build_server(config: &DaemonConfig, clock: Arc<dyn Clock>) -> Server {
    // 1. Room state store (in-memory)
    let board = RoomBoard::new(config.seed_rooms.iter().cloned(), config.policy);
    let repository = Arc::new(InMemoryRoomStateRepository::new(board, clock));

    // 2. Connection registry and the pusher on top of it
    let registry = Arc::new(ConnectionRegistry::new());
    let message_pusher = Arc::new(TcpMessagePusher::new(registry));

    // 3. UseCases share one sequencer so greetings and broadcasts stay ordered
    let sequencer = Arc::new(BroadcastSequencer::new());
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        sequencer.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(message_pusher.clone()));
    let apply_progress_usecase = Arc::new(ApplyProgressUseCase::new(
        repository,
        message_pusher,
        sequencer,
    ));

    // 4. Server
    Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        apply_progress_usecase,
    )
}
