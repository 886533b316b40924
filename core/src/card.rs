use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer should draw for a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    FaceDown(DisplayNumber),
    FaceUp(CandyType),
    Matched(CandyType),
}

impl CardFace {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::FaceUp(_) | Self::Matched(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    candy: CandyType,
    number: DisplayNumber,
    revealed: bool,
    matched: bool,
}

impl Card {
    pub(crate) const fn new(candy: CandyType, number: DisplayNumber) -> Self {
        Self {
            candy,
            number,
            revealed: false,
            matched: false,
        }
    }

    pub const fn candy_type(&self) -> CandyType {
        self.candy
    }

    pub const fn display_number(&self) -> DisplayNumber {
        self.number
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_matched(&self) -> bool {
        self.matched
    }

    /// Face-down and not yet matched.
    pub const fn is_selectable(&self) -> bool {
        !self.revealed && !self.matched
    }

    pub const fn face(&self) -> CardFace {
        match (self.matched, self.revealed) {
            (true, _) => CardFace::Matched(self.candy),
            (false, true) => CardFace::FaceUp(self.candy),
            (false, false) => CardFace::FaceDown(self.number),
        }
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn hide(&mut self) {
        self.revealed = false;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }

    /// Back to face-down and unmatched, keeping candy and number.
    pub(crate) fn reset(&mut self) {
        self.revealed = false;
        self.matched = false;
    }
}
