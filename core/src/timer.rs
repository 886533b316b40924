use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of advancing the round clock by one second
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Clock is not running, nothing changed
    Stopped,
    /// One second elapsed, this many are left
    Ticked(Seconds),
    /// The last second elapsed, the clock stopped at zero
    Expired,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Stopped)
    }
}

/// Countdown for one round. It has no notion of wall-clock time: whoever owns
/// it calls [`RoundTimer::tick`] once per elapsed second.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimer {
    remaining: Seconds,
    running: bool,
}

impl RoundTimer {
    pub const fn new(duration: Seconds) -> Self {
        Self {
            remaining: duration,
            running: duration > 0,
        }
    }

    pub const fn remaining(&self) -> Seconds {
        self.remaining
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn is_running_low(&self) -> bool {
        self.remaining <= LOW_TIME_THRESHOLD
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Stopped;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked(self.remaining)
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(ROUND_DURATION)
    }
}
