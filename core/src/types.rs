/// Position of a card in the deck, row-major over the grid, `0..CARD_COUNT`.
pub type CardId = u8;

/// Identity of a candy, `0..PAIR_COUNT`. Exactly two cards share each value.
pub type CandyType = u8;

/// Cosmetic ordinal printed on the back of a card, `1..=CARD_COUNT`.
pub type DisplayNumber = u8;

/// Whole seconds on the round clock.
pub type Seconds = u8;

/// Monotonic round counter, bumped every time a new round starts.
pub type Generation = u32;

/// Card at `(column, row)`, `None` when the coordinates fall outside the grid.
pub const fn card_id_at((x, y): (u8, u8)) -> Option<CardId> {
    if x < crate::GRID_SIZE && y < crate::GRID_SIZE {
        Some(y * crate::GRID_SIZE + x)
    } else {
        None
    }
}
