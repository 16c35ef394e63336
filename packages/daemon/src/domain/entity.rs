//! Room state store entities.
//!
//! `RoomBoard` is the in-memory mapping of room id to progress. It is the
//! only place where progress is mutated; readers get a `BoardSnapshot`,
//! an owned copy that is never affected by later updates.

use std::collections::BTreeMap;

use super::{
    error::RoomStateError,
    value_object::{RoomId, Step, Timestamp},
};

/// Progress of one room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomProgress {
    pub step: Step,
    /// `None` until the room's first update
    pub last_updated: Option<Timestamp>,
}

/// How the board treats room ids it was not seeded with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoomPolicy {
    /// Unknown rooms are added on their first update.
    #[default]
    Permissive,
    /// Only seeded rooms can be updated.
    Fixed,
}

/// Room state store
#[derive(Debug, Clone)]
pub struct RoomBoard {
    rooms: BTreeMap<RoomId, RoomProgress>,
    policy: RoomPolicy,
}

impl RoomBoard {
    /// Create a board with every seeded room at step 0.
    pub fn new(seed: impl IntoIterator<Item = RoomId>, policy: RoomPolicy) -> Self {
        let rooms = seed
            .into_iter()
            .map(|room| (room, RoomProgress::default()))
            .collect();
        Self { rooms, policy }
    }

    /// Overwrite the step of `room` and stamp it with `at`.
    ///
    /// Last write wins: a smaller step than the stored one is accepted.
    pub fn update(&mut self, room: RoomId, step: Step, at: Timestamp) -> Result<(), RoomStateError> {
        let progress = RoomProgress {
            step,
            last_updated: Some(at),
        };

        match self.rooms.get_mut(&room) {
            Some(existing) => *existing = progress,
            None => match self.policy {
                RoomPolicy::Permissive => {
                    self.rooms.insert(room, progress);
                }
                RoomPolicy::Fixed => {
                    return Err(RoomStateError::UnknownRoom(room.into_string()));
                }
            },
        }

        Ok(())
    }

    pub fn get(&self, room: &RoomId) -> Option<&RoomProgress> {
        self.rooms.get(room)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rooms: self.rooms.clone(),
        }
    }
}

/// Immutable copy of the board at one point in time, ordered by room id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    rooms: BTreeMap<RoomId, RoomProgress>,
}

impl BoardSnapshot {
    pub fn get(&self, room: &RoomId) -> Option<&RoomProgress> {
        self.rooms.get(room)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoomId, &RoomProgress)> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl IntoIterator for BoardSnapshot {
    type Item = (RoomId, RoomProgress);
    type IntoIter = std::collections::btree_map::IntoIter<RoomId, RoomProgress>;

    fn into_iter(self) -> Self::IntoIter {
        self.rooms.into_iter()
    }
}
