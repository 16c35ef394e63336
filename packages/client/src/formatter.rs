//! Leaderboard rendering for the room display.

use leaderboard_shared::{defaults::TOTAL_STEPS, protocol::StateMessage};

/// Width of the panel between the two vertical borders.
const INNER_WIDTH: usize = 46;

/// Cells drawn per completed step.
const CELLS_PER_STEP: usize = 3;

/// Formatter for the leaderboard panel
pub struct LeaderboardFormatter;

impl LeaderboardFormatter {
    /// Render the full panel.
    ///
    /// Every room in `state` gets one bar, in room id order. The client's own
    /// room is labelled `YOU` (and shown at step 0 if the daemon does not
    /// know it yet); every other room is `OPP`.
    pub fn format_leaderboard(state: &StateMessage, own_room: &str) -> String {
        let mut rooms: Vec<(&str, u64)> = state
            .data
            .iter()
            .map(|(room, info)| (room.as_str(), info.step))
            .collect();
        if !state.data.contains_key(own_room) {
            rooms.push((own_room, 0));
            rooms.sort_by(|a, b| a.0.cmp(b.0));
        }

        let border = "═".repeat(INNER_WIDTH);
        let blank = format!("║{}║\n", " ".repeat(INNER_WIDTH));

        let mut output = String::new();
        output.push_str(&format!("╔{}╗\n", border));
        output.push_str(&blank);
        output.push_str(&format!("║{:^width$}║\n", "ESCAPE ROOM PROGRESS", width = INNER_WIDTH));
        output.push_str(&format!("╠{}╣\n", border));
        output.push_str(&blank);
        for (room, step) in rooms {
            let label = if room == own_room { "YOU" } else { "OPP" };
            output.push_str(&Self::format_row(label, step));
        }
        output.push_str(&blank);
        output.push_str(&format!("╚{}╝\n", border));
        output
    }

    /// One `║ YOU:[######      ]      ║` row.
    pub fn format_row(label: &str, step: u64) -> String {
        let row = format!(" {}:[{}]", label, Self::format_bar(step));
        format!("║{:<width$}║\n", row, width = INNER_WIDTH)
    }

    /// Progress bar body, clamped to `0..=TOTAL_STEPS`.
    pub fn format_bar(step: u64) -> String {
        let done = step.min(TOTAL_STEPS) as usize;
        let todo = TOTAL_STEPS as usize - done;
        format!(
            "{}{}",
            "#".repeat(done * CELLS_PER_STEP),
            " ".repeat(todo * CELLS_PER_STEP)
        )
    }

    /// Prompt shown while waiting for the game master's input.
    pub fn format_prompt(room: &str) -> String {
        format!("[{}] Enter current step number: ", room)
    }

    pub fn format_invalid_input() -> String {
        "Invalid input. Please enter a number.\n".to_string()
    }
}
