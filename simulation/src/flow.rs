//! Screen-level state machine wrapping the simulation.

use std::{mem, time::Duration};

use lane_defence_core::{AudioCue, AudioRequest, Event, Outcome, PointerPress, Soundtrack};
use lane_defence_world::query;
use tracing::info;

use crate::{
    modal::{GameOverPage, ModalStep, RulesPage, StartChoice, StartMenu},
    Simulation, TickClock, TickInput,
};

/// Screen currently presented to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Title screen waiting for a press.
    Start,
    /// Rules page reached from the title screen.
    Rules,
    /// A run is in progress.
    Running,
    /// The run ended; the page waits for a press before resetting.
    GameOver {
        /// How the run ended.
        outcome: Outcome,
        /// Score reached when the run ended.
        score: u32,
    },
}

/// Input gathered by an adapter for one rendered frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlowInput<'a> {
    /// Pointer presses observed during the frame.
    pub presses: &'a [PointerPress],
    /// Whether the abort-run key was pressed.
    pub forfeit: bool,
    /// Whether the player asked to close the game.
    pub quit: bool,
}

/// Whether the adapter should keep presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowStatus {
    /// Keep running.
    Continue,
    /// Shut down after carrying out the queued audio requests.
    Exit,
}

/// Drives the start, rules, running and game-over screens.
#[derive(Debug)]
pub struct GameFlow {
    simulation: Simulation,
    clock: TickClock,
    screen: Screen,
    game_over_page: GameOverPage,
    pending: TickInput,
    audio: Vec<AudioRequest>,
}

impl GameFlow {
    /// Creates a flow sitting on the start screen with music requested.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_clock(seed, TickClock::default())
    }

    /// Creates a flow that paces ticks with the provided clock.
    #[must_use]
    pub fn with_clock(seed: u64, clock: TickClock) -> Self {
        Self {
            simulation: Simulation::new(seed),
            clock,
            screen: Screen::Start,
            game_over_page: GameOverPage::default(),
            pending: TickInput::default(),
            audio: vec![AudioRequest::PlayMusic(Soundtrack::Background)],
        }
    }

    /// Screen currently presented.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Simulation backing the current run.
    #[must_use]
    pub const fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Whether the game-over page already accepts a press.
    #[must_use]
    pub fn game_over_accepts_input(&self) -> bool {
        matches!(self.screen, Screen::GameOver { .. }) && self.game_over_page.accepts_input()
    }

    /// Hands the queued audio requests to the adapter, oldest first.
    pub fn drain_audio(&mut self) -> Vec<AudioRequest> {
        mem::take(&mut self.audio)
    }

    /// Processes one rendered frame.
    pub fn advance(&mut self, frame: Duration, input: FlowInput<'_>) -> FlowStatus {
        if input.quit {
            info!("quit requested");
            self.audio.push(AudioRequest::StopMusic);
            return FlowStatus::Exit;
        }

        match self.screen {
            Screen::Start => match StartMenu.handle(input.presses) {
                ModalStep::Continue => {}
                ModalStep::Done(StartChoice::Rules) => self.screen = Screen::Rules,
                ModalStep::Done(StartChoice::Play) => self.begin_run(),
            },
            Screen::Rules => {
                if let ModalStep::Done(()) = RulesPage.handle(input.presses) {
                    self.screen = Screen::Start;
                }
            }
            Screen::Running => self.run_frame(frame, input),
            Screen::GameOver { .. } => {
                if let ModalStep::Done(()) = self.game_over_page.handle(frame, input.presses) {
                    self.return_to_start();
                }
            }
        }

        FlowStatus::Continue
    }

    fn begin_run(&mut self) {
        self.screen = Screen::Running;
        self.clock.reset();
        self.pending = TickInput::default();
        let events = self.simulation.start_run();
        self.react(&events);
    }

    fn run_frame(&mut self, frame: Duration, input: FlowInput<'_>) {
        self.pending.presses.extend_from_slice(input.presses);
        self.pending.forfeit |= input.forfeit;

        for _ in 0..self.clock.advance(frame) {
            let tick_input = mem::take(&mut self.pending);
            let events = self.simulation.step(&tick_input);
            self.react(&events);
            if self.screen != Screen::Running {
                break;
            }
        }
    }

    fn react(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::HordeApproaching => {
                    self.audio.push(AudioRequest::PlayCue(AudioCue::HordeApproaching));
                }
                Event::GameOver { outcome } => self.end_run(*outcome),
                _ => {}
            }
        }
    }

    fn end_run(&mut self, outcome: Outcome) {
        let score = query::economy(self.simulation.world()).score;
        self.screen = Screen::GameOver { outcome, score };
        self.game_over_page = GameOverPage::default();
        self.pending = TickInput::default();

        let cue = match outcome {
            Outcome::Victory => AudioCue::Victory,
            Outcome::Defeat => AudioCue::Defeat,
        };
        self.audio.push(AudioRequest::StopMusic);
        self.audio.push(AudioRequest::PlayCue(cue));
    }

    fn return_to_start(&mut self) {
        let _ = self.simulation.reset();
        self.screen = Screen::Start;
        self.audio.push(AudioRequest::PlayMusic(Soundtrack::Background));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{PixelPoint, PointerButton};

    fn click() -> [PointerPress; 1] {
        [PointerPress::new(PixelPoint::new(700, 100), PointerButton::Primary)]
    }

    #[test]
    fn pending_input_waits_for_the_next_tick() {
        let mut flow = GameFlow::new(3);
        let _ = flow.advance(
            Duration::ZERO,
            FlowInput {
                presses: &click(),
                ..FlowInput::default()
            },
        );
        assert_eq!(flow.screen(), Screen::Running);

        let press = [PointerPress::new(PixelPoint::new(10, 90), PointerButton::Primary)];
        let _ = flow.advance(
            Duration::ZERO,
            FlowInput {
                presses: &press,
                ..FlowInput::default()
            },
        );
        assert_eq!(flow.pending.presses.len(), 1, "no tick was due yet");

        let _ = flow.advance(flow.clock.step(), FlowInput::default());
        assert!(flow.pending.presses.is_empty());
        assert_eq!(query::plant_view(flow.simulation().world()).into_vec().len(), 1);
    }
}
