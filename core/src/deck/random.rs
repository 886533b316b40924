use alloc::vec::Vec;

use super::*;

/// Shuffles the candy pairs and the number overlay with two independent passes over a seeded RNG.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckBuilder {
    seed: u64,
}

impl RandomDeckBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckBuilder for RandomDeckBuilder {
    fn build(self) -> Deck {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut candies: Vec<CandyType> = (0..PAIR_COUNT).flat_map(|candy| [candy, candy]).collect();
        candies.shuffle(&mut rng);

        let mut numbers: Vec<DisplayNumber> = (1..=CARD_COUNT).collect();
        numbers.shuffle(&mut rng);

        log::trace!("dealt candies {:?} numbered {:?}", candies, numbers);
        Deck::from_parts_unchecked(&candies, &numbers)
    }
}
