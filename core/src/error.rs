use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card id")]
    InvalidCardId,
    #[error("Deck layout must hold every candy type exactly twice")]
    InvalidDeck,
    #[error("Display numbers must be a permutation of 1 to 16")]
    InvalidNumbering,
}

pub type Result<T> = core::result::Result<T, GameError>;
