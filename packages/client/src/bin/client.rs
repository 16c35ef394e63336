//! Room client for the escape room leaderboard.
//!
//! Connects to the leaderboard daemon, sends the step typed at the prompt and
//! redraws both rooms' progress after every broadcast. Reconnects on
//! connection loss (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin leaderboard-client -- A
//! cargo run --bin leaderboard-client -- b --host 10.0.0.2 --port 5000
//! ```

use clap::Parser;

use leaderboard_client::{domain::parse_room, run_client};
use leaderboard_shared::{
    defaults::{DEFAULT_HOST, DEFAULT_PORT},
    logger::setup_logger,
};

#[derive(Parser, Debug)]
#[command(name = "leaderboard-client")]
#[command(about = "Escape room client that reports progress to the leaderboard daemon", long_about = None)]
struct Args {
    /// Room this terminal reports for (A or B, case-insensitive)
    #[arg(value_parser = parse_room)]
    room: String,

    /// Daemon host
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Daemon port
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    if let Err(e) = run_client(&args.host, args.port, &args.room).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
