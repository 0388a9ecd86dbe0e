//! # pontoon-engine: Blackjack Game Engine Core
//!
//! A deterministic single-player Blackjack engine: one player versus an
//! automated dealer, dealt from a per-round shuffled 52-card deck with
//! reproducible RNG for replay and debugging.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Hand scoring with ace downgrading (11 to 1)
//! - [`dealer`] - Fixed dealer policy (draw below 17, stand at 17+)
//! - [`round`] - The round state machine (start / hit / stand)
//! - [`journal`] - RoundRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use pontoon_engine::cards::{Card, Rank, Suit};
//! use pontoon_engine::deck::Deck;
//! use pontoon_engine::round::{Outcome, Round, RoundState};
//!
//! // Deal from a fixed card order: player draws first, then the dealer
//! let deck = Deck::from_cards(vec![
//!     Card { suit: Suit::Spades, rank: Rank::Ten },
//!     Card { suit: Suit::Hearts, rank: Rank::Ace },
//!     Card { suit: Suit::Clubs, rank: Rank::Five },
//!     Card { suit: Suit::Diamonds, rank: Rank::Six },
//! ]);
//!
//! let round = Round::start(deck).unwrap();
//! assert_eq!(round.state(), RoundState::Resolved(Outcome::PlayerBlackjack));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All deals are reproducible using seeded RNG:
//!
//! ```rust
//! use pontoon_engine::deck::Deck;
//!
//! // Same seed produces same shuffle
//! let deck1 = Deck::new_with_seed(42);
//! let deck2 = Deck::new_with_seed(42);
//! // deck1 and deck2 will have identical card order
//! ```
//!
//! ## Hand Scoring
//!
//! Aces count 11 and downgrade to 1 while the hand would bust:
//!
//! ```rust
//! use pontoon_engine::cards::{Card, Rank, Suit};
//! use pontoon_engine::hand::Hand;
//!
//! let mut hand = Hand::new();
//! hand.push(Card { suit: Suit::Hearts, rank: Rank::Ace });
//! hand.push(Card { suit: Suit::Spades, rank: Rank::Ace });
//! assert_eq!(hand.score(), 12);
//! ```

pub mod cards;
pub mod dealer;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod journal;
pub mod round;
