use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Hooks a [`GameSession`] fires as the round progresses. Every method defaults
/// to doing nothing, and none of them can influence the game.
pub trait GameObserver {
    /// A card turned face-up or face-down.
    fn on_card_flipped(&mut self, _id: CardId, _card: &Card) {}

    fn on_tick(&mut self, _remaining: Seconds) {}

    fn on_match(&mut self) {}

    fn on_mismatch(&mut self) {}

    /// Call [`GameSession::flip_back`] with `ticket` after [`FLIP_BACK_DELAY_MS`].
    fn on_flip_back_scheduled(&mut self, _ticket: FlipBack) {}

    fn on_win(&mut self) {}

    fn on_lose(&mut self) {}
}

impl GameObserver for () {}

/// A single observed occurrence, as recorded by `Vec<GameEvent>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CardFlipped { id: CardId, face: CardFace },
    Tick(Seconds),
    Match,
    Mismatch,
    FlipBackScheduled(FlipBack),
    Won,
    Lost,
}

/// Records events in the order they fire, to be drained by the driver.
impl GameObserver for Vec<GameEvent> {
    fn on_card_flipped(&mut self, id: CardId, card: &Card) {
        self.push(GameEvent::CardFlipped {
            id,
            face: card.face(),
        });
    }

    fn on_tick(&mut self, remaining: Seconds) {
        self.push(GameEvent::Tick(remaining));
    }

    fn on_match(&mut self) {
        self.push(GameEvent::Match);
    }

    fn on_mismatch(&mut self) {
        self.push(GameEvent::Mismatch);
    }

    fn on_flip_back_scheduled(&mut self, ticket: FlipBack) {
        self.push(GameEvent::FlipBackScheduled(ticket));
    }

    fn on_win(&mut self) {
        self.push(GameEvent::Won);
    }

    fn on_lose(&mut self) {
        self.push(GameEvent::Lost);
    }
}
