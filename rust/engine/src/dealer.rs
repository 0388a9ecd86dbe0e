use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::Hand;

/// The dealer stands at this score or above, soft or hard.
pub const DEALER_STAND_SCORE: u8 = 17;

/// Runs the dealer to completion: draw while below 17, stand at 17 or more.
/// The policy looks only at the downgraded score, so a soft 17 stands.
/// Invoked exactly once per round, after the player stands.
pub fn play_dealer(hand: &mut Hand, deck: &mut Deck) -> Result<(), GameError> {
    while hand.score() < DEALER_STAND_SCORE {
        let card = deck.deal_card().ok_or(GameError::DeckExhausted)?;
        hand.push(card);
    }
    Ok(())
}
