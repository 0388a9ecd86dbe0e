//! Input parsing and validation for interactive commands.
//!
//! This module provides functions for parsing and validating user input in
//! interactive CLI commands. It handles:
//! - Player action parsing (hit, stand, quit)
//! - Nickname validation (emptiness plus the spam filter)
//!
//! ## Error Handling
//!
//! Validation functions return structured `Result` types or custom enums
//! (like `ParseResult`) to provide clear error messages to users.

use std::collections::HashSet;

use pontoon_engine::round::Action;

/// Messages longer than this are rejected outright.
const SPAM_MAX_LEN: usize = 2000;
/// Above this share of unique characters, long input is treated as noise.
const SPAM_UNIQUE_RATIO: f64 = 0.8;
/// The ratio check only applies past this length; short names made of
/// distinct letters ("alice") are always fine.
const SPAM_RATIO_MIN_LEN: usize = 20;

/// Result type for parsing user input into round actions.
///
/// This enum represents the three possible outcomes when parsing user input
/// in interactive gameplay commands:
/// - Valid action (hit or stand)
/// - Quit command (user wants to leave the table)
/// - Invalid input with error message
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid round action parsed from input
    Action(Action),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input string into a round action or special commands.
///
/// Accepts the following input formats (case-insensitive):
/// - "h" or "hit" → Hit
/// - "s" or "stand" → Stand
/// - "q" or "quit" → Quit command
///
/// # Arguments
///
/// * `input` - User input string to parse
///
/// # Returns
///
/// `ParseResult` indicating success, quit, or error with message
///
/// # Example
///
/// ```rust
/// # use pontoon_cli::validation::{parse_player_action, ParseResult};
/// use pontoon_engine::round::Action;
///
/// assert_eq!(
///     parse_player_action("hit"),
///     ParseResult::Action(Action::Hit)
/// );
///
/// assert_eq!(
///     parse_player_action("s"),
///     ParseResult::Action(Action::Stand)
/// );
///
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
///
/// match parse_player_action("double") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    // Check for quit commands first
    if parts[0] == "q" || parts[0] == "quit" {
        return ParseResult::Quit;
    }

    match parts[0] {
        "hit" | "h" => ParseResult::Action(Action::Hit),
        "stand" | "s" => ParseResult::Action(Action::Stand),
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: hit, stand, q",
            parts[0]
        )),
    }
}

/// Report whether a piece of free text looks like spam.
///
/// Two checks, in order: text longer than 2000 characters, and text past 20
/// characters where more than 80% of the characters are distinct (random
/// key-mash rather than a name or sentence).
pub fn is_spam(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() > SPAM_MAX_LEN {
        return true;
    }
    if chars.len() >= SPAM_RATIO_MIN_LEN {
        let unique: HashSet<char> = chars.iter().copied().collect();
        if unique.len() as f64 / chars.len() as f64 > SPAM_UNIQUE_RATIO {
            return true;
        }
    }
    false
}

/// Validate a leaderboard nickname before it reaches the service.
///
/// Rejects names that are empty after trimming and names caught by the
/// spam filter. The service applies its own emptiness check again; this
/// front-line check exists so the user sees the reason, not a bare error.
///
/// # Example
///
/// ```rust
/// # use pontoon_cli::validation::validate_nickname;
///
/// assert!(validate_nickname("alice").is_ok());
/// assert!(validate_nickname("   ").is_err());
/// ```
pub fn validate_nickname(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Nickname must not be empty".to_string());
    }
    if is_spam(trimmed) {
        return Err("Nickname rejected by the spam filter".to_string());
    }
    Ok(())
}
