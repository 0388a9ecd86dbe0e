use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Deck exhausted during deal")]
    DeckExhausted,
    #[error("Round already resolved")]
    RoundResolved,
}
