use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Highest score a hand can hold without busting.
pub const BLACKJACK: u8 = 21;

/// A blackjack hand. Grows one card at a time; scoring counts aces as 11
/// and downgrades them to 1 while the total exceeds 21, so the score is a
/// function of the card multiset alone, never of deal order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Best blackjack score for this hand.
    pub fn score(&self) -> u8 {
        self.evaluate().0
    }

    /// True when at least one ace is still counted as 11 in the final score.
    pub fn is_soft(&self) -> bool {
        self.evaluate().1
    }

    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }

    /// An opening two-card 21 (a natural). Only the opening deal can produce
    /// one; a hit that lands on 21 is a plain 21.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.score() == BLACKJACK
    }

    fn evaluate(&self) -> (u8, bool) {
        let mut total: u8 = 0;
        let mut aces: u8 = 0;
        for card in &self.cards {
            if card.rank == Rank::Ace {
                aces += 1;
            }
            total = total.saturating_add(card.rank.value());
        }
        while total > BLACKJACK && aces > 0 {
            total -= 10;
            aces -= 1;
        }
        (total, aces > 0)
    }
}
