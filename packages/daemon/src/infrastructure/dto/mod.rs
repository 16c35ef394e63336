//! Data Transfer Objects for the leaderboard protocol.
//!
//! The wire types themselves live in `leaderboard_shared::protocol` so the
//! client can decode them too; this module converts domain snapshots into
//! them.

pub mod conversion;

pub use conversion::encode_snapshot;
