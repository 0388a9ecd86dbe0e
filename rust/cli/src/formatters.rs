//! Card, hand, and outcome formatters for terminal display.
//!
//! This module provides pure functions for formatting game elements (cards,
//! hands, round outcomes) for terminal output. It supports Unicode card
//! symbols with ASCII fallback for terminal environments that don't support
//! Unicode rendering.
//!
//! ## Unicode vs ASCII Fallback
//!
//! Callers pass an explicit `ascii` flag so that rendering stays deterministic
//! under test; the `play` command derives the flag from `--ascii`, the
//! configuration, and [`supports_unicode`].
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use pontoon_engine::cards::{Card, Rank, Suit};
//! use pontoon_cli::formatters::{format_card, format_hand};
//!
//! let ace_spades = Card { suit: Suit::Spades, rank: Rank::Ace };
//! assert_eq!(format_card(&ace_spades, false), "A♠");
//! assert_eq!(format_card(&ace_spades, true), "As");
//!
//! let hand = vec![ace_spades];
//! assert_eq!(format_hand(&hand, false), "[A♠]");
//! ```

use pontoon_engine::cards::{Card, Rank, Suit};
use pontoon_engine::round::Outcome;
use pontoon_service::UserStats;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
///
/// # Returns
///
/// `true` if Unicode symbols are supported, `false` for ASCII fallback
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Format a Suit as a string using Unicode symbols or the ASCII fallback.
///
/// # Unicode symbols
/// - Hearts: ♥
/// - Diamonds: ♦
/// - Clubs: ♣
/// - Spades: ♠
///
/// # ASCII fallback
/// - Hearts: h
/// - Diamonds: d
/// - Clubs: c
/// - Spades: s
pub fn format_suit(suit: &Suit, ascii: bool) -> String {
    if ascii {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    } else {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    }
}

/// Format a Rank as a string (2-10, J, Q, K, A).
///
/// Ten renders as "10", the usual blackjack table notation.
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
    .to_string()
}

/// Format a Card as a string combining rank and suit.
///
/// # Example
///
/// ```rust
/// use pontoon_engine::cards::{Card, Rank, Suit};
/// # use pontoon_cli::formatters::format_card;
///
/// let ten_hearts = Card { suit: Suit::Hearts, rank: Rank::Ten };
/// assert_eq!(format_card(&ten_hearts, false), "10♥");
/// assert_eq!(format_card(&ten_hearts, true), "10h");
/// ```
pub fn format_card(card: &Card, ascii: bool) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit, ascii))
}

/// Format a hand (list of cards) as a string in bracket notation.
///
/// # Returns
///
/// Formatted hand string like "[A♠ K♥]" or "[]" if empty
pub fn format_hand(cards: &[Card], ascii: bool) -> String {
    if cards.is_empty() {
        "[]".to_string()
    } else {
        let formatted_cards: Vec<String> = cards.iter().map(|c| format_card(c, ascii)).collect();
        format!("[{}]", formatted_cards.join(" "))
    }
}

/// Format the dealer's hand with one "?" placeholder per face-down card.
///
/// While the player acts the dealer shows only the up-card, so the usual
/// render is "[9♣ ?]".
pub fn format_dealer_hand(visible: &[Card], hidden: usize, ascii: bool) -> String {
    let mut parts: Vec<String> = visible.iter().map(|c| format_card(c, ascii)).collect();
    parts.extend(std::iter::repeat_n("?".to_string(), hidden));
    if parts.is_empty() {
        "[]".to_string()
    } else {
        format!("[{}]", parts.join(" "))
    }
}

/// Format a round outcome as the player-facing verdict line.
pub fn format_outcome(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::PlayerBlackjack => "Blackjack! You win!",
        Outcome::PlayerWin => "You win!",
        Outcome::PlayerLoss => "You lose!",
        Outcome::PlayerBust => "Bust! You lose!",
        Outcome::Push => "Push!",
    }
}

/// Format a stats record as a compact win/loss/tie summary.
///
/// # Example
///
/// ```rust
/// use pontoon_service::UserStats;
/// # use pontoon_cli::formatters::format_record;
///
/// let mut stats = UserStats::new(7);
/// stats.games = 4;
/// stats.wins = 2;
/// stats.losses = 1;
/// stats.ties = 1;
/// assert_eq!(format_record(&stats), "2W-1L-1T (4 games)");
/// ```
pub fn format_record(stats: &UserStats) -> String {
    format!(
        "{}W-{}L-{}T ({} games)",
        stats.wins, stats.losses, stats.ties, stats.games
    )
}
