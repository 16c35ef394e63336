//! Defaults shared by the daemon and the client.

/// Loopback address the daemon binds to and the client connects to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// TCP port of the daemon.
pub const DEFAULT_PORT: u16 = 5000;

/// Room ids of the escape room deployment, in display order.
pub const KNOWN_ROOMS: [&str; 2] = ["A", "B"];

/// Number of puzzles per room; the leaderboard bar is this many steps wide.
pub const TOTAL_STEPS: u64 = 6;
