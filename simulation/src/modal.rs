//! Modal screens shown around a run.
//!
//! Each screen is a small state machine fed with the presses of a frame. It
//! never touches the world; it only reports when it is done and with what.

use std::time::Duration;

use lane_defence_core::{
    tunables::{rules_button, GAME_OVER_INPUT_DELAY_MS},
    PointerPress,
};

/// Progress reported by a modal screen after handling a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalStep<T> {
    /// The screen keeps waiting for input.
    Continue,
    /// The screen finished with the provided result.
    Done(T),
}

/// Choices offered by the start screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartChoice {
    /// Begin a run.
    Play,
    /// Show the rules page.
    Rules,
}

/// Title screen: a press on the rules label opens the rules, any other starts a run.
#[derive(Clone, Copy, Debug, Default)]
pub struct StartMenu;

impl StartMenu {
    /// Resolves the first press of the frame, if any.
    #[must_use]
    pub fn handle(&self, presses: &[PointerPress]) -> ModalStep<StartChoice> {
        match presses.first() {
            None => ModalStep::Continue,
            Some(press) if rules_button().contains(press.point) => {
                ModalStep::Done(StartChoice::Rules)
            }
            Some(_) => ModalStep::Done(StartChoice::Play),
        }
    }
}

/// Rules page: any press returns to the start screen.
#[derive(Clone, Copy, Debug, Default)]
pub struct RulesPage;

impl RulesPage {
    /// Completes as soon as any press arrives.
    #[must_use]
    pub fn handle(&self, presses: &[PointerPress]) -> ModalStep<()> {
        if presses.is_empty() {
            ModalStep::Continue
        } else {
            ModalStep::Done(())
        }
    }
}

/// End-of-run page that ignores presses for a short delay before accepting one.
#[derive(Clone, Copy, Debug)]
pub struct GameOverPage {
    delay: Duration,
    elapsed: Duration,
}

impl Default for GameOverPage {
    fn default() -> Self {
        Self::new(Duration::from_millis(GAME_OVER_INPUT_DELAY_MS))
    }
}

impl GameOverPage {
    /// Creates a page that starts accepting presses after `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
        }
    }

    /// Reports whether presses are currently accepted.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.elapsed >= self.delay
    }

    /// Accounts for the frame time, then resolves the frame's presses.
    pub fn handle(&mut self, frame: Duration, presses: &[PointerPress]) -> ModalStep<()> {
        let accepting = self.accepts_input();
        self.elapsed = self.elapsed.saturating_add(frame);
        if accepting && !presses.is_empty() {
            ModalStep::Done(())
        } else {
            ModalStep::Continue
        }
    }
}
