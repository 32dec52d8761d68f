//! Fixed-step pacing of simulation ticks over variable frame times.

use std::time::Duration;

use lane_defence_core::tunables::{MAX_TICKS_PER_FRAME, TICK_RATE};

/// Accumulates frame time and releases it as whole fixed-length ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickClock {
    step: Duration,
    accumulator: Duration,
    max_ticks_per_frame: u32,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(TICK_RATE, MAX_TICKS_PER_FRAME)
    }
}

impl TickClock {
    /// Creates a clock running at `tick_rate` ticks per second that releases
    /// at most `max_ticks_per_frame` ticks per call to [`TickClock::advance`].
    #[must_use]
    pub fn new(tick_rate: u32, max_ticks_per_frame: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / tick_rate.max(1),
            accumulator: Duration::ZERO,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
        }
    }

    /// Length of a single tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Adds the frame time and returns how many ticks are due.
    ///
    /// Backlog beyond the per-frame cap is dropped so a stalled frame cannot
    /// trigger an unbounded catch-up.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(frame);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if ticks == self.max_ticks_per_frame && self.accumulator >= self.step {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Discards any accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
