//! Repository implementations
//!
//! - `inmemory`: process-memory store, the only backend

pub mod inmemory;

pub use inmemory::InMemoryRoomStateRepository;
