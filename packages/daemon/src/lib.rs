//! Escape room leaderboard daemon.
//!
//! Accepts newline-delimited JSON connections, keeps the progress of every
//! room in memory and broadcasts the full state to all connected rooms after
//! each `progress_update`.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod app;
pub mod config;

pub use app::build_server;
pub use config::DaemonConfig;
