use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of selecting a card
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// Card was matched, already face-up, a mismatch is waiting to flip back, or the round is over
    Ignored,
    /// Card was revealed as the first half of a pair
    FirstPick,
    /// Card was revealed and completed a pair
    Match,
    /// Card was revealed and completed the last pair, ending the round
    Won,
    /// Card was revealed and does not pair with the first pick
    Mismatch,
}

impl SelectOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            Ignored => false,
            FirstPick => true,
            Match => true,
            Won => true,
            Mismatch => true,
        }
    }

    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match | Self::Won)
    }
}

/// Cards picked this turn that have not been resolved yet.
///
/// A matching second pick resolves immediately, so both slots are only ever
/// filled by a mismatch waiting for its flip-back.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Empty,
    First(CardId),
    Mismatched(CardId, CardId),
}

impl Selection {
    pub const fn pending_first(self) -> Option<CardId> {
        match self {
            Self::Empty => None,
            Self::First(first) | Self::Mismatched(first, _) => Some(first),
        }
    }

    pub const fn pending_second(self) -> Option<CardId> {
        match self {
            Self::Mismatched(_, second) => Some(second),
            _ => None,
        }
    }

    /// A mismatched pair is face-up and blocks every selection until it flips back.
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Mismatched(..))
    }

    /// Runs one pick against `deck`. A `Match` here is never `Won`, the caller decides that.
    pub(crate) fn select(&mut self, deck: &mut Deck, id: CardId) -> SelectOutcome {
        if !deck[id].is_selectable() {
            return SelectOutcome::Ignored;
        }

        match *self {
            Self::Mismatched(..) => SelectOutcome::Ignored,
            Self::Empty => {
                deck.card_mut(id).reveal();
                *self = Self::First(id);
                SelectOutcome::FirstPick
            }
            Self::First(first) => {
                deck.card_mut(id).reveal();
                if deck[first].candy_type() == deck[id].candy_type() {
                    deck.card_mut(first).mark_matched();
                    deck.card_mut(id).mark_matched();
                    *self = Self::Empty;
                    SelectOutcome::Match
                } else {
                    *self = Self::Mismatched(first, id);
                    SelectOutcome::Mismatch
                }
            }
        }
    }

    /// Hides a mismatched pair and clears both slots, returning the pair that was hidden.
    pub(crate) fn flip_back(&mut self, deck: &mut Deck) -> Option<(CardId, CardId)> {
        let Self::Mismatched(first, second) = *self else {
            return None;
        };

        deck.card_mut(first).hide();
        deck.card_mut(second).hide();
        *self = Self::Empty;
        Some((first, second))
    }
}
