//! Code shared by the leaderboard daemon and the room client.
//!
//! - `protocol`: newline-delimited JSON wire messages
//! - `time`: clock abstraction and timestamp formatting
//! - `logger`: tracing subscriber setup
//! - `defaults`: addresses and room ids both binaries agree on

pub mod defaults;
pub mod logger;
pub mod protocol;
pub mod time;
