//! UI utilities for the client.

use std::io::Write;

use leaderboard_shared::protocol::StateMessage;

use crate::formatter::LeaderboardFormatter;

/// ANSI sequence that clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Redraw the leaderboard from scratch and put the prompt back.
pub fn render_state(state: &StateMessage, room: &str) {
    print!(
        "{}{}",
        CLEAR_SCREEN,
        LeaderboardFormatter::format_leaderboard(state, room)
    );
    redisplay_prompt(room);
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(room: &str) {
    print!("{}", LeaderboardFormatter::format_prompt(room));
    std::io::stdout().flush().ok();
}
