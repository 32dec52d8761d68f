#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick-loop orchestration for Lane Defence.
//!
//! [`Simulation`] wires the authoritative world to the pure systems: every
//! tick it turns pointer presses into placement commands, advances the world
//! and answers due waves. [`GameFlow`] layers the start, rules and game-over
//! screens on top and paces ticks with a fixed-step [`TickClock`].

pub mod clock;
pub mod flow;
pub mod modal;

pub use clock::TickClock;
pub use flow::{FlowInput, FlowStatus, GameFlow, Screen};

use lane_defence_core::{Command, Event, PointerPress};
use lane_defence_system_planting::Planting;
use lane_defence_system_spawning::{Config as SpawningConfig, Spawning};
use lane_defence_world::{self as world, query, World};
use tracing::{debug, info};

/// Input consumed by a single simulation tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Pointer presses observed since the previous tick.
    pub presses: Vec<PointerPress>,
    /// Whether the player asked to abandon the run.
    pub forfeit: bool,
}

/// Owns the world together with the systems that drive it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawning: Spawning,
    planting: Planting,
    carried_events: Vec<Event>,
}

impl Simulation {
    /// Creates a simulation whose waves are generated from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            world: World::new(),
            spawning: Spawning::new(SpawningConfig::new(seed)),
            planting: Planting::new(),
            carried_events: Vec::new(),
        }
    }

    /// Read-only access to the world for queries and rendering.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Prepares a run, spawning an opening wave when the field is empty.
    pub fn start_run(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if query::is_game_over(&self.world) || query::entity_counts(&self.world).zombies > 0 {
            return events;
        }

        let mut commands = Vec::new();
        self.spawning.opening_wave(&mut commands);
        self.execute(commands, &mut events);
        self.record(&events);
        events
    }

    /// Advances the world by one tick and reports everything that happened.
    pub fn step(&mut self, input: &TickInput) -> Vec<Event> {
        let mut commands = Vec::new();
        self.planting
            .handle(&self.carried_events, &input.presses, &mut commands);
        self.carried_events.clear();
        if input.forfeit {
            commands.push(Command::Forfeit);
        }
        commands.push(Command::Tick);

        let mut events = Vec::new();
        self.execute(commands, &mut events);

        let mut waves = Vec::new();
        self.spawning.handle(&events, &mut waves);
        self.execute(waves, &mut events);

        self.record(&events);
        events
    }

    /// Restores the world to its initial state.
    pub fn reset(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        self.execute(vec![Command::Reset], &mut events);
        self.record(&events);
        events
    }

    fn execute(&mut self, commands: Vec<Command>, events: &mut Vec<Event>) {
        for command in commands {
            world::apply(&mut self.world, command, events);
        }
    }

    fn record(&mut self, events: &[Event]) {
        for event in events {
            log_event(event);
        }
        self.carried_events.extend_from_slice(events);
    }
}

fn log_event(event: &Event) {
    match event {
        Event::PlacementRejected { kind, cell, reason } => debug!(
            ?kind,
            column = cell.column(),
            lane = cell.lane(),
            %reason,
            "placement rejected"
        ),
        Event::PlantPlaced { plant, kind, cell } => debug!(
            plant = plant.get(),
            ?kind,
            column = cell.column(),
            lane = cell.lane(),
            "plant placed"
        ),
        Event::PlantDestroyed { plant, .. } => debug!(plant = plant.get(), "plant destroyed"),
        Event::ZombieKilled { zombie, score } => {
            debug!(zombie = zombie.get(), score, "zombie killed");
        }
        Event::WaveSpawned { zombies } => debug!(zombies, "wave spawned"),
        Event::LevelAdvanced {
            level,
            score_to_next_level,
            spawn_threshold,
        } => info!(
            level,
            score_to_next_level,
            spawn_threshold,
            "level advanced"
        ),
        Event::GameOver { outcome } => info!(?outcome, "game over"),
        Event::WorldReset => info!("world reset"),
        _ => {}
    }
}
