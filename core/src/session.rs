use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Round is being played
    #[default]
    InProgress,
    /// Every pair was found before the clock ran out
    Won,
    /// The clock ran out first
    Lost,
}

impl RoundOutcome {
    /// Indicates the round has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Deferred action that hides a mismatched pair, bound to the round that scheduled it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlipBack {
    generation: Generation,
    first: CardId,
    second: CardId,
}

impl FlipBack {
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    pub const fn cards(&self) -> (CardId, CardId) {
        (self.first, self.second)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipBackOutcome {
    /// Ticket belongs to an earlier round or its pair was already hidden
    Stale,
    FlippedBack,
}

impl FlipBackOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::FlippedBack)
    }
}

/// Everything that belongs to one round. Replaced wholesale when the next round starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    generation: Generation,
    deck: Deck,
    selection: Selection,
    pairs_found: u8,
    timer: RoundTimer,
    outcome: RoundOutcome,
}

impl Round {
    fn new(generation: Generation, deck: Deck) -> Self {
        Self {
            generation,
            deck,
            selection: Selection::default(),
            pairs_found: 0,
            timer: RoundTimer::new(ROUND_DURATION),
            outcome: RoundOutcome::InProgress,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn pairs_found(&self) -> u8 {
        self.pairs_found
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }
}

/// Derives the deck seed of a round so each generation deals a different but reproducible deck.
const fn round_seed(seed: u64, generation: Generation) -> u64 {
    seed ^ (generation as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Plays rounds one after another. Owns the current [`Round`] and reports what
/// happens in it to an observer `O`.
///
/// All mutation goes through `&mut self`, so selections, ticks and flip-backs
/// are serialized by whoever owns the session.
#[derive(Clone, Debug)]
pub struct GameSession<O = ()> {
    seed: u64,
    round: Round,
    observer: O,
}

impl<O: GameObserver> GameSession<O> {
    /// Creates a session and deals its first round.
    pub fn new(seed: u64, observer: O) -> Self {
        let generation = 1;
        let deck = RandomDeckBuilder::new(round_seed(seed, generation)).build();
        log::debug!("session seed {}, round {} started", seed, generation);
        Self {
            seed,
            round: Round::new(generation, deck),
            observer,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn generation(&self) -> Generation {
        self.round.generation
    }

    pub fn deck(&self) -> &Deck {
        &self.round.deck
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.round.deck.card(id)
    }

    pub fn time_remaining(&self) -> Seconds {
        self.round.timer.remaining()
    }

    pub fn is_running_low(&self) -> bool {
        self.round.timer.is_running_low()
    }

    pub fn pairs_found(&self) -> u8 {
        self.round.pairs_found
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.round.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.round.outcome.is_finished()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// The flip-back owed to the currently face-up mismatched pair, if any.
    pub fn pending_flip_back(&self) -> Option<FlipBack> {
        match self.round.selection {
            Selection::Mismatched(first, second) => Some(FlipBack {
                generation: self.round.generation,
                first,
                second,
            }),
            _ => None,
        }
    }

    /// Throws the current round away and deals a fresh one. Any outstanding
    /// [`FlipBack`] becomes stale.
    pub fn start_new_round(&mut self) {
        let generation = self.round.generation.wrapping_add(1);
        let deck = RandomDeckBuilder::new(round_seed(self.seed, generation)).build();
        self.begin_round(generation, deck);
    }

    /// Like [`GameSession::start_new_round`] but plays `deck` instead of dealing one.
    /// Cards the deck carries face-up or matched are turned back first.
    pub fn start_round_with_deck(&mut self, deck: Deck) {
        let generation = self.round.generation.wrapping_add(1);
        self.begin_round(generation, deck);
    }

    fn begin_round(&mut self, generation: Generation, mut deck: Deck) {
        if !self.round.outcome.is_finished() {
            log::debug!("abandoning round {}", self.round.generation);
        }
        deck.reset();
        self.round = Round::new(generation, deck);
        log::debug!("round {} started", generation);
    }

    pub fn select_card(&mut self, id: CardId) -> Result<SelectOutcome> {
        let id = self.round.deck.validate_id(id)?;

        if self.round.outcome.is_finished() {
            log::trace!("card {} ignored, round is over", id);
            return Ok(SelectOutcome::Ignored);
        }

        let Round {
            deck, selection, ..
        } = &mut self.round;
        let first = selection.pending_first();
        let outcome = selection.select(deck, id);
        log::trace!("select card {}: {:?}", id, outcome);

        if !outcome.has_update() {
            return Ok(outcome);
        }

        self.observer.on_card_flipped(id, &self.round.deck[id]);

        Ok(match outcome {
            SelectOutcome::Match => {
                // the first pick turned from face-up to matched
                if let Some(first) = first {
                    self.observer.on_card_flipped(first, &self.round.deck[first]);
                }
                self.resolve_match()
            }
            SelectOutcome::Mismatch => {
                self.observer.on_mismatch();
                if let Some(ticket) = self.pending_flip_back() {
                    self.observer.on_flip_back_scheduled(ticket);
                }
                SelectOutcome::Mismatch
            }
            other => other,
        })
    }

    fn resolve_match(&mut self) -> SelectOutcome {
        self.round.pairs_found += 1;
        self.observer.on_match();

        if self.round.pairs_found >= PAIR_COUNT {
            self.end_round(RoundOutcome::Won);
            SelectOutcome::Won
        } else {
            SelectOutcome::Match
        }
    }

    /// Advances the round clock by one second, ending the round when it runs out.
    pub fn tick(&mut self) -> TickOutcome {
        if self.round.outcome.is_finished() {
            return TickOutcome::Stopped;
        }

        let outcome = self.round.timer.tick();
        match outcome {
            TickOutcome::Stopped => {}
            TickOutcome::Ticked(remaining) => {
                log::trace!("tick, {} seconds left", remaining);
                self.observer.on_tick(remaining);
            }
            TickOutcome::Expired => {
                self.observer.on_tick(0);
                if self.round.pairs_found < PAIR_COUNT {
                    self.end_round(RoundOutcome::Lost);
                }
            }
        }
        outcome
    }

    /// Hides the mismatched pair named by `ticket`. Tickets from earlier rounds,
    /// or ones that already fired, change nothing.
    pub fn flip_back(&mut self, ticket: FlipBack) -> FlipBackOutcome {
        if ticket.generation != self.round.generation {
            log::debug!(
                "dropping flip-back from round {}, now playing round {}",
                ticket.generation,
                self.round.generation
            );
            return FlipBackOutcome::Stale;
        }

        if self.pending_flip_back() != Some(ticket) {
            log::debug!("flip-back for {:?} already resolved", ticket.cards());
            return FlipBackOutcome::Stale;
        }

        let Round {
            deck, selection, ..
        } = &mut self.round;
        let Some((first, second)) = selection.flip_back(deck) else {
            return FlipBackOutcome::Stale;
        };

        log::trace!("flipped back cards {} and {}", first, second);
        self.observer.on_card_flipped(first, &self.round.deck[first]);
        self.observer.on_card_flipped(second, &self.round.deck[second]);
        FlipBackOutcome::FlippedBack
    }

    fn end_round(&mut self, outcome: RoundOutcome) {
        if self.round.outcome.is_finished() {
            return;
        }

        self.round.timer.stop();
        self.round.outcome = outcome;
        log::debug!(
            "round {} ended {:?} with {} pairs and {} seconds left",
            self.round.generation,
            outcome,
            self.round.pairs_found,
            self.round.timer.remaining()
        );

        match outcome {
            RoundOutcome::Won => self.observer.on_win(),
            RoundOutcome::Lost => self.observer.on_lose(),
            RoundOutcome::InProgress => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    // pairs: (0, 5) (1, 4) (2, 6) (3, 7) (8, 12) (9, 13) (10, 14) (11, 15)
    const LAYOUT: [CandyType; 16] = [2, 0, 1, 3, 0, 2, 1, 3, 4, 5, 6, 7, 4, 5, 6, 7];
    const PAIRS: [(CardId, CardId); 8] = [
        (0, 5),
        (1, 4),
        (2, 6),
        (3, 7),
        (8, 12),
        (9, 13),
        (10, 14),
        (11, 15),
    ];

    fn session() -> GameSession<Vec<GameEvent>> {
        let mut session = GameSession::new(0, Vec::new());
        session.start_round_with_deck(Deck::from_candy_types(&LAYOUT).unwrap());
        session
    }

    fn count(events: &[GameEvent], wanted: GameEvent) -> usize {
        events.iter().filter(|&&event| event == wanted).count()
    }

    #[test]
    fn first_pick_then_pair_matches() {
        let mut session = session();

        assert_eq!(session.select_card(0).unwrap(), SelectOutcome::FirstPick);
        assert!(session.card(0).unwrap().is_revealed());

        assert_eq!(session.select_card(5).unwrap(), SelectOutcome::Match);
        assert!(session.card(0).unwrap().is_matched());
        assert!(session.card(5).unwrap().is_matched());
        assert_eq!(session.pairs_found(), 1);
        assert_eq!(session.round().selection(), Selection::Empty);
        assert_eq!(session.outcome(), RoundOutcome::InProgress);
    }

    #[test]
    fn mismatch_flips_back_and_cards_become_selectable() {
        let mut session = session();

        session.select_card(0).unwrap();
        assert_eq!(session.select_card(1).unwrap(), SelectOutcome::Mismatch);

        let ticket = session.pending_flip_back().unwrap();
        assert_eq!(ticket.cards(), (0, 1));
        assert_eq!(
            session.observer().last(),
            Some(&GameEvent::FlipBackScheduled(ticket))
        );

        assert_eq!(session.flip_back(ticket), FlipBackOutcome::FlippedBack);
        assert!(!session.card(0).unwrap().is_revealed());
        assert!(!session.card(1).unwrap().is_revealed());
        assert_eq!(session.pending_flip_back(), None);

        assert_eq!(session.select_card(1).unwrap(), SelectOutcome::FirstPick);
        assert_eq!(session.select_card(4).unwrap(), SelectOutcome::Match);
    }

    #[test]
    fn flip_back_fires_only_once() {
        let mut session = session();
        session.select_card(0).unwrap();
        session.select_card(1).unwrap();
        let ticket = session.pending_flip_back().unwrap();

        assert_eq!(session.flip_back(ticket), FlipBackOutcome::FlippedBack);
        session.select_card(2).unwrap();
        assert_eq!(session.flip_back(ticket), FlipBackOutcome::Stale);
        assert!(session.card(2).unwrap().is_revealed());
    }

    #[test]
    fn pending_mismatch_blocks_third_pick() {
        let mut session = session();
        session.select_card(0).unwrap();
        session.select_card(1).unwrap();
        let before = session.round().clone();

        assert_eq!(session.select_card(2).unwrap(), SelectOutcome::Ignored);
        assert_eq!(session.select_card(5).unwrap(), SelectOutcome::Ignored);
        assert_eq!(session.round(), &before);
    }

    #[test]
    fn matched_card_selection_is_idempotent() {
        let mut session = session();
        session.select_card(0).unwrap();
        session.select_card(5).unwrap();
        let before = session.round().clone();
        let events = session.observer().len();

        for _ in 0..5 {
            assert_eq!(session.select_card(5).unwrap(), SelectOutcome::Ignored);
            assert_eq!(session.select_card(0).unwrap(), SelectOutcome::Ignored);
        }
        assert_eq!(session.round(), &before);
        assert_eq!(session.observer().len(), events);
    }

    #[test]
    fn eighth_match_wins_and_freezes_round() {
        let mut session = session();
        session.tick();

        for (index, &(first, second)) in PAIRS.iter().enumerate() {
            assert_eq!(session.select_card(first).unwrap(), SelectOutcome::FirstPick);
            let outcome = session.select_card(second).unwrap();
            if index + 1 == PAIRS.len() {
                assert_eq!(outcome, SelectOutcome::Won);
            } else {
                assert_eq!(outcome, SelectOutcome::Match);
            }
            assert!(outcome.is_match());
            assert_eq!(session.pairs_found() as usize, index + 1);
        }

        assert_eq!(session.outcome(), RoundOutcome::Won);
        assert_eq!(session.pairs_found(), PAIR_COUNT);
        assert_eq!(session.deck().matched_count(), usize::from(CARD_COUNT));
        assert_eq!(count(session.observer(), GameEvent::Won), 1);
        assert_eq!(count(session.observer(), GameEvent::Match), 8);

        assert_eq!(session.select_card(0).unwrap(), SelectOutcome::Ignored);
        assert_eq!(session.tick(), TickOutcome::Stopped);
        assert_eq!(session.time_remaining(), ROUND_DURATION - 1);
        assert!(!session.round().timer().is_running());
    }

    #[test]
    fn clock_running_out_loses_exactly_once() {
        let mut session = session();
        let mut previous = session.time_remaining();

        for _ in 0..ROUND_DURATION {
            assert!(session.tick().has_update());
            assert!(session.time_remaining() <= previous);
            previous = session.time_remaining();
        }

        assert_eq!(session.time_remaining(), 0);
        assert_eq!(session.outcome(), RoundOutcome::Lost);

        for _ in 0..5 {
            assert_eq!(session.tick(), TickOutcome::Stopped);
        }
        assert_eq!(session.time_remaining(), 0);
        assert_eq!(count(session.observer(), GameEvent::Lost), 1);
        assert_eq!(count(session.observer(), GameEvent::Tick(0)), 1);

        assert_eq!(session.select_card(3).unwrap(), SelectOutcome::Ignored);
        assert!(!session.card(3).unwrap().is_revealed());
    }

    #[test]
    fn clock_keeps_running_through_mismatch() {
        let mut session = session();
        session.select_card(0).unwrap();
        session.select_card(1).unwrap();

        assert_eq!(session.tick(), TickOutcome::Ticked(ROUND_DURATION - 1));
        assert!(session.pending_flip_back().is_some());
    }

    #[test]
    fn new_round_invalidates_pending_flip_back() {
        let mut session = session();
        session.select_card(0).unwrap();
        session.select_card(1).unwrap();
        let ticket = session.pending_flip_back().unwrap();

        session.start_round_with_deck(Deck::from_candy_types(&LAYOUT).unwrap());
        session.select_card(0).unwrap();
        session.select_card(1).unwrap();
        let before = session.round().clone();

        assert_eq!(session.flip_back(ticket), FlipBackOutcome::Stale);
        assert_eq!(session.round(), &before);
        assert_ne!(session.pending_flip_back(), Some(ticket));
    }

    #[test]
    fn new_round_resets_everything() {
        let mut session = session();
        session.select_card(0).unwrap();
        session.select_card(5).unwrap();
        session.tick();
        let generation = session.generation();

        session.start_new_round();

        assert_eq!(session.generation(), generation + 1);
        assert_eq!(session.pairs_found(), 0);
        assert_eq!(session.time_remaining(), ROUND_DURATION);
        assert_eq!(session.outcome(), RoundOutcome::InProgress);
        assert_eq!(session.round().selection(), Selection::Empty);
        assert!(session.deck().cards().iter().all(Card::is_selectable));
    }

    #[test]
    fn lost_round_can_be_replayed() {
        let mut session = session();
        for _ in 0..ROUND_DURATION {
            session.tick();
        }
        assert_eq!(session.outcome(), RoundOutcome::Lost);

        session.start_new_round();
        assert_eq!(session.outcome(), RoundOutcome::InProgress);
        assert!(session.select_card(0).unwrap().has_update());
    }

    #[test]
    fn invalid_card_id_is_an_error() {
        let mut session = session();
        assert_eq!(session.select_card(16), Err(GameError::InvalidCardId));
        assert_eq!(session.select_card(u8::MAX), Err(GameError::InvalidCardId));
    }

    #[test]
    fn observer_sees_flips_in_order() {
        let mut session = session();
        session.select_card(0).unwrap();
        session.select_card(1).unwrap();
        let ticket = session.pending_flip_back().unwrap();
        session.flip_back(ticket);

        assert_eq!(
            session.observer().as_slice(),
            &[
                GameEvent::CardFlipped {
                    id: 0,
                    face: CardFace::FaceUp(2)
                },
                GameEvent::CardFlipped {
                    id: 1,
                    face: CardFace::FaceUp(0)
                },
                GameEvent::Mismatch,
                GameEvent::FlipBackScheduled(ticket),
                GameEvent::CardFlipped {
                    id: 0,
                    face: CardFace::FaceDown(1)
                },
                GameEvent::CardFlipped {
                    id: 1,
                    face: CardFace::FaceDown(2)
                },
            ]
        );
    }

    #[test]
    fn same_seed_replays_same_rounds() {
        let mut a = GameSession::new(99, ());
        let mut b = GameSession::new(99, ());
        assert_eq!(a.deck(), b.deck());

        let first = a.deck().clone();
        a.start_new_round();
        b.start_new_round();
        assert_eq!(a.deck(), b.deck());
        assert_ne!(a.deck(), &first);
    }

    #[test]
    fn pairs_found_only_grows_under_random_play() {
        for seed in 0..50u64 {
            let mut session = GameSession::new(seed, ());
            let mut pairs = 0;
            let mut step = seed;

            while !session.is_finished() {
                step = step.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let id = ((step >> 33) % u64::from(CARD_COUNT)) as CardId;
                session.select_card(id).unwrap();
                if let Some(ticket) = session.pending_flip_back() {
                    session.flip_back(ticket);
                }
                session.tick();

                assert!(session.pairs_found() >= pairs);
                pairs = session.pairs_found();
                assert_eq!(
                    session.pairs_found() == PAIR_COUNT,
                    session.outcome() == RoundOutcome::Won
                );
            }
        }
    }

    #[test]
    fn replayed_deck_starts_face_down_and_can_be_won() {
        let mut session = session();
        session.select_card(0).unwrap();
        session.select_card(5).unwrap();
        session.select_card(1).unwrap();
        let played = session.deck().clone();
        assert_eq!(played.matched_count(), 2);

        session.start_round_with_deck(played);

        assert_eq!(session.deck().matched_count(), 0);
        assert!(session.deck().cards().iter().all(Card::is_selectable));
        for &(first, second) in &PAIRS {
            session.select_card(first).unwrap();
            session.select_card(second).unwrap();
        }
        assert_eq!(session.pairs_found(), PAIR_COUNT);
        assert_eq!(session.outcome(), RoundOutcome::Won);
    }

    #[test]
    fn match_reports_both_cards_as_matched() {
        let mut session = session();
        session.select_card(0).unwrap();
        session.select_card(5).unwrap();

        assert_eq!(
            session.observer().as_slice(),
            &[
                GameEvent::CardFlipped {
                    id: 0,
                    face: CardFace::FaceUp(2)
                },
                GameEvent::CardFlipped {
                    id: 5,
                    face: CardFace::Matched(2)
                },
                GameEvent::CardFlipped {
                    id: 0,
                    face: CardFace::Matched(2)
                },
                GameEvent::Match,
            ]
        );
    }
}
