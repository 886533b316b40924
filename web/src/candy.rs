use candy_memory_core as game;

/// How a candy type is drawn on a face-up card.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CandyStyle {
    pub name: &'static str,
    pub glyph: &'static str,
    pub color: (u8, u8, u8),
}

impl CandyStyle {
    const ALL: [CandyStyle; game::PAIR_COUNT as usize] = [
        CandyStyle::new("red", "🍬", (255, 100, 100)),
        CandyStyle::new("green", "🍭", (100, 200, 100)),
        CandyStyle::new("blue", "🍡", (100, 100, 255)),
        CandyStyle::new("yellow", "🍋", (255, 200, 0)),
        CandyStyle::new("purple", "🍇", (200, 100, 200)),
        CandyStyle::new("orange", "🍊", (255, 150, 0)),
        CandyStyle::new("cyan", "🧁", (100, 200, 200)),
        CandyStyle::new("pink", "🍩", (255, 180, 180)),
    ];

    const fn new(name: &'static str, glyph: &'static str, color: (u8, u8, u8)) -> Self {
        Self { name, glyph, color }
    }

    /// Falls back to the first style for out-of-range candies, rendering never fails.
    pub(crate) fn of(candy: game::CandyType) -> Self {
        Self::ALL
            .get(usize::from(candy))
            .copied()
            .unwrap_or(Self::ALL[0])
    }

    pub(crate) fn css_color(self) -> String {
        let (r, g, b) = self.color;
        format!("rgb({}, {}, {})", r, g, b)
    }
}
