//! Terminal room client for the escape room leaderboard.
//!
//! Sends the game master's step updates to the daemon and redraws the
//! leaderboard whenever a `state` broadcast arrives.

pub mod domain;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;

pub use error::ClientError;
pub use runner::run_client;
