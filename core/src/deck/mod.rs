use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait DeckBuilder {
    fn build(self) -> Deck;
}

/// The 16 cards of one round, in grid order.
///
/// Deserializing checks the layout the same way [`Deck::from_layout`] does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeckCards")]
pub struct Deck {
    cards: Vec<Card>,
}

#[derive(Deserialize)]
struct DeckCards {
    cards: Vec<Card>,
}

impl TryFrom<DeckCards> for Deck {
    type Error = GameError;

    fn try_from(DeckCards { cards }: DeckCards) -> Result<Self> {
        let candies: Vec<CandyType> = cards.iter().map(Card::candy_type).collect();
        let numbers: Vec<DisplayNumber> = cards.iter().map(Card::display_number).collect();
        validate_candies(&candies)?;
        validate_numbers(&numbers)?;

        Ok(Self { cards })
    }
}

impl Deck {
    /// Builds a deck from explicit candy types and display numbers, one of each per card.
    pub fn from_layout(candies: &[CandyType], numbers: &[DisplayNumber]) -> Result<Self> {
        validate_candies(candies)?;
        validate_numbers(numbers)?;

        Ok(Self::from_parts_unchecked(candies, numbers))
    }

    /// Builds a deck from explicit candy types, numbering the cards 1 to 16 in grid order.
    pub fn from_candy_types(candies: &[CandyType]) -> Result<Self> {
        let numbers: Vec<DisplayNumber> = (1..=CARD_COUNT).collect();
        Self::from_layout(candies, &numbers)
    }

    pub(crate) fn from_parts_unchecked(candies: &[CandyType], numbers: &[DisplayNumber]) -> Self {
        let cards = candies
            .iter()
            .zip(numbers)
            .map(|(&candy, &number)| Card::new(candy, number))
            .collect();
        Self { cards }
    }

    pub fn validate_id(&self, id: CardId) -> Result<CardId> {
        if usize::from(id) < self.cards.len() {
            Ok(id)
        } else {
            Err(GameError::InvalidCardId)
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        let id = self.validate_id(id)?;
        Ok(&self[id])
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        (0..).zip(self.cards.iter())
    }

    /// The other card carrying the same candy as `id`.
    pub fn pair_of(&self, id: CardId) -> Option<CardId> {
        let candy = self.card(id).ok()?.candy_type();
        self.iter()
            .find(|&(other, card)| other != id && card.candy_type() == candy)
            .map(|(other, _)| other)
    }

    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched()).count()
    }

    /// Turns every card face-down and unmatched so the deck can open a round.
    pub(crate) fn reset(&mut self) {
        self.cards.iter_mut().for_each(Card::reset);
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> &mut Card {
        &mut self.cards[usize::from(id)]
    }
}

impl Index<CardId> for Deck {
    type Output = Card;

    fn index(&self, id: CardId) -> &Self::Output {
        &self.cards[usize::from(id)]
    }
}

fn validate_candies(candies: &[CandyType]) -> Result<()> {
    if candies.len() != usize::from(CARD_COUNT) {
        return Err(GameError::InvalidDeck);
    }

    let mut counts = [0u8; PAIR_COUNT as usize];
    for &candy in candies {
        let slot = counts
            .get_mut(usize::from(candy))
            .ok_or(GameError::InvalidDeck)?;
        *slot += 1;
    }

    if counts.iter().all(|&count| count == 2) {
        Ok(())
    } else {
        Err(GameError::InvalidDeck)
    }
}

fn validate_numbers(numbers: &[DisplayNumber]) -> Result<()> {
    if numbers.len() != usize::from(CARD_COUNT) {
        return Err(GameError::InvalidNumbering);
    }

    let mut seen = [false; CARD_COUNT as usize];
    for &number in numbers {
        let slot = number
            .checked_sub(1)
            .and_then(|index| seen.get_mut(usize::from(index)))
            .ok_or(GameError::InvalidNumbering)?;
        if *slot {
            return Err(GameError::InvalidNumbering);
        }
        *slot = true;
    }

    Ok(())
}
