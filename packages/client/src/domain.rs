//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use leaderboard_shared::defaults::KNOWN_ROOMS;

use crate::error::ClientError;

/// Validate a room argument against the known rooms (case-insensitive).
///
/// Used as a clap `value_parser`, so the error is the message clap prints
/// next to the usage line.
pub fn parse_room(value: &str) -> Result<String, String> {
    let room = value.trim().to_uppercase();
    if KNOWN_ROOMS.contains(&room.as_str()) {
        Ok(room)
    } else {
        Err(format!("Room must be one of: {}", KNOWN_ROOMS.join(", ")))
    }
}

/// Parse a line typed by the game master into a step number.
pub fn parse_step(input: &str) -> Result<u64, ClientError> {
    let trimmed = input.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| ClientError::InvalidStep(trimmed.to_string()))
}

/// Check if the client should exit immediately based on the error type.
///
/// Protocol errors mean the daemon speaks something else; reconnecting
/// would not help.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::Decode(_) | ClientError::Encode(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
