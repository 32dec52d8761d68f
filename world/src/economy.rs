//! Currency, score and level progression.

use lane_defence_core::{
    tunables::{
        score_requirement_for_level, spawn_interval_for_level, MAX_LEVEL, SCORE_PER_KILL,
        STARTING_CURRENCY, STARTING_SCORE_TO_NEXT_LEVEL,
    },
    PlacementError,
};

/// Result of registering a kill against the level ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KillOutcome {
    /// Score was awarded; the level did not change.
    Scored,
    /// The score requirement was met and the next level began.
    LevelAdvanced,
    /// The score requirement of the final level was met.
    FinalLevelCleared,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Economy {
    pub(crate) currency: u32,
    pub(crate) score: u32,
    pub(crate) level: u32,
    pub(crate) score_to_next_level: i32,
    pub(crate) spawn_threshold: u32,
}

impl Economy {
    pub(crate) fn new() -> Self {
        Self {
            currency: STARTING_CURRENCY,
            score: 0,
            level: 1,
            score_to_next_level: STARTING_SCORE_TO_NEXT_LEVEL,
            spawn_threshold: spawn_interval_for_level(1),
        }
    }

    /// Adds `amount` to the balance and returns the new balance.
    pub(crate) fn credit(&mut self, amount: u32) -> u32 {
        self.currency = self.currency.saturating_add(amount);
        self.currency
    }

    pub(crate) fn can_afford(&self, price: u32) -> Result<(), PlacementError> {
        if self.currency >= price {
            Ok(())
        } else {
            Err(PlacementError::InsufficientCurrency {
                price,
                available: self.currency,
            })
        }
    }

    pub(crate) fn spend(&mut self, price: u32) -> Result<(), PlacementError> {
        self.can_afford(price)?;
        self.currency -= price;
        Ok(())
    }

    pub(crate) fn register_kill(&mut self) -> KillOutcome {
        self.score = self.score.saturating_add(SCORE_PER_KILL);
        self.score_to_next_level -= SCORE_PER_KILL as i32;

        if self.score_to_next_level > 0 {
            return KillOutcome::Scored;
        }

        if self.level >= MAX_LEVEL {
            return KillOutcome::FinalLevelCleared;
        }

        self.level += 1;
        self.score_to_next_level = score_requirement_for_level(self.level);
        self.spawn_threshold = spawn_interval_for_level(self.level).min(self.spawn_threshold);
        KillOutcome::LevelAdvanced
    }
}
