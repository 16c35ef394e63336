//! Daemon configuration.

use leaderboard_shared::defaults::{DEFAULT_HOST, DEFAULT_PORT, KNOWN_ROOMS};
use thiserror::Error;

use crate::domain::{RoomId, RoomPolicy, ValueObjectError};

/// Invalid command line configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid room id '{room}': {source}")]
    InvalidRoom {
        room: String,
        #[source]
        source: ValueObjectError,
    },

    #[error("--strict-rooms needs at least one room in --rooms")]
    NoRooms,
}

/// Daemon settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub host: String,
    pub port: u16,
    /// Rooms present at step 0 from startup
    pub seed_rooms: Vec<RoomId>,
    pub policy: RoomPolicy,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed_rooms: KNOWN_ROOMS
                .iter()
                .filter_map(|id| RoomId::try_from(*id).ok())
                .collect(),
            policy: RoomPolicy::Permissive,
        }
    }
}

impl DaemonConfig {
    /// Build a configuration from raw command line values.
    pub fn new(
        host: String,
        port: u16,
        rooms: Vec<String>,
        strict_rooms: bool,
    ) -> Result<Self, ConfigError> {
        let mut seed_rooms = Vec::with_capacity(rooms.len());
        for room in rooms {
            let room = room.trim().to_string();
            let id = RoomId::new(room.clone())
                .map_err(|source| ConfigError::InvalidRoom { room, source })?;
            if !seed_rooms.contains(&id) {
                seed_rooms.push(id);
            }
        }

        if strict_rooms && seed_rooms.is_empty() {
            return Err(ConfigError::NoRooms);
        }

        Ok(Self {
            host,
            port,
            seed_rooms,
            policy: if strict_rooms {
                RoomPolicy::Fixed
            } else {
                RoomPolicy::Permissive
            },
        })
    }
}
