//! Escape room leaderboard daemon.
//!
//! Receives progress updates from the room clients and broadcasts the shared
//! state to every connected room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin leaderboard-daemon
//! cargo run --bin leaderboard-daemon -- --port 5001 --rooms A,B --strict-rooms
//! ```

use std::sync::Arc;

use clap::Parser;
use leaderboard_daemon::{DaemonConfig, build_server};
use leaderboard_shared::{
    defaults::{DEFAULT_HOST, DEFAULT_PORT},
    logger::setup_logger,
    time::SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "leaderboard-daemon")]
#[command(about = "Shares escape room progress between rooms", long_about = None)]
struct Args {
    /// Host address to bind the daemon to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the daemon to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Rooms present at step 0 from startup
    #[arg(short = 'r', long, value_delimiter = ',', default_value = "A,B")]
    rooms: Vec<String>,

    /// Reject updates for rooms not listed in --rooms
    #[arg(long)]
    strict_rooms: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let config = match DaemonConfig::new(args.host, args.port, args.rooms, args.strict_rooms) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    tracing::info!(
        "Seeded rooms: {:?} ({:?} policy)",
        config
            .seed_rooms
            .iter()
            .map(|room| room.as_str())
            .collect::<Vec<_>>(),
        config.policy
    );

    let server = build_server(&config, Arc::new(SystemClock));
    if let Err(e) = server.run(&config.host, config.port).await {
        tracing::error!("Daemon error: {}", e);
        std::process::exit(1);
    }
}
