use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::dealer::play_dealer;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::Hand;

/// A player-issued game action. This is the complete action vocabulary:
/// transports map their own tokens onto these variants and reject anything
/// that does not map, so free-form input never reaches the engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Begin a new round (deal opening hands)
    Start,
    /// Draw one more card
    Hit,
    /// Stop drawing and let the dealer play
    Stand,
}

/// Final result of a resolved round, from the player's perspective.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Opening two-card 21; counts as a win
    PlayerBlackjack,
    /// Player finished closer to 21, or the dealer bust
    PlayerWin,
    /// Dealer finished closer to 21
    PlayerLoss,
    /// Player drew past 21; counts as a loss
    PlayerBust,
    /// Equal scores; counts as a tie
    Push,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::PlayerBlackjack | Outcome::PlayerWin)
    }

    pub fn is_loss(self) -> bool {
        matches!(self, Outcome::PlayerLoss | Outcome::PlayerBust)
    }

    pub fn is_push(self) -> bool {
        matches!(self, Outcome::Push)
    }
}

/// Where a round stands. A round is either waiting on the player or carries
/// its final outcome; "no round at all" is the absence of a session in the
/// directory, never a variant here.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundState {
    /// The player may hit or stand
    AwaitingAction,
    /// The round is over and will accept no further actions
    Resolved(Outcome),
}

/// One blackjack round: a private deck, the two hands, and the state machine
/// over them. Constructed by [`Round::start`], advanced by [`Round::hit`] and
/// [`Round::stand`], and immutable once resolved.
#[derive(Debug)]
pub struct Round {
    deck: Deck,
    player: Hand,
    dealer: Hand,
    state: RoundState,
}

impl Round {
    /// Deals the opening hands from `deck`: two cards to the player, then two
    /// to the dealer. An opening natural resolves the round on the spot as
    /// [`Outcome::PlayerBlackjack`]; otherwise the player is up.
    pub fn start(mut deck: Deck) -> Result<Self, GameError> {
        let mut player = Hand::new();
        let mut dealer = Hand::new();
        for _ in 0..2 {
            player.push(deck.deal_card().ok_or(GameError::DeckExhausted)?);
        }
        for _ in 0..2 {
            dealer.push(deck.deal_card().ok_or(GameError::DeckExhausted)?);
        }
        let state = if player.is_natural() {
            RoundState::Resolved(Outcome::PlayerBlackjack)
        } else {
            RoundState::AwaitingAction
        };
        Ok(Self {
            deck,
            player,
            dealer,
            state,
        })
    }

    /// Draws one card for the player. Going past 21 resolves the round as
    /// [`Outcome::PlayerBust`]; otherwise the player may act again.
    pub fn hit(&mut self) -> Result<RoundState, GameError> {
        self.ensure_open()?;
        let card = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
        self.player.push(card);
        if self.player.is_bust() {
            self.state = RoundState::Resolved(Outcome::PlayerBust);
        }
        Ok(self.state)
    }

    /// Ends the player's turn: the dealer draws to 17 or more, then the
    /// scores are compared and the round resolves.
    pub fn stand(&mut self) -> Result<RoundState, GameError> {
        self.ensure_open()?;
        play_dealer(&mut self.dealer, &mut self.deck)?;
        let player = self.player.score();
        let dealer = self.dealer.score();
        let outcome = if self.dealer.is_bust() || player > dealer {
            Outcome::PlayerWin
        } else if dealer > player {
            Outcome::PlayerLoss
        } else {
            Outcome::Push
        };
        self.state = RoundState::Resolved(outcome);
        Ok(self.state)
    }

    fn ensure_open(&self) -> Result<(), GameError> {
        match self.state {
            RoundState::AwaitingAction => Ok(()),
            RoundState::Resolved(_) => Err(GameError::RoundResolved),
        }
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    /// The dealer's single visible card while the player acts.
    pub fn dealer_up_card(&self) -> Option<Card> {
        self.dealer.cards().first().copied()
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, RoundState::Resolved(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            RoundState::AwaitingAction => None,
            RoundState::Resolved(outcome) => Some(outcome),
        }
    }
}
