#![no_std]

extern crate alloc;

pub use card::*;
pub use deck::*;
pub use error::*;
pub use observer::*;
pub use selection::*;
pub use session::*;
pub use timer::*;
pub use types::*;

mod card;
mod deck;
mod error;
mod observer;
mod selection;
mod session;
mod timer;
mod types;

/// Cards per row and per column.
pub const GRID_SIZE: u8 = 4;

pub const CARD_COUNT: u8 = GRID_SIZE * GRID_SIZE;

/// Distinct candy types, each dealt twice.
pub const PAIR_COUNT: u8 = CARD_COUNT / 2;

/// Length of a round.
pub const ROUND_DURATION: Seconds = 40;

/// How long a mismatched pair stays face-up before it flips back.
pub const FLIP_BACK_DELAY_MS: u32 = 1_000;

/// The clock counts as running low at or below this many seconds.
pub const LOW_TIME_THRESHOLD: Seconds = 10;
