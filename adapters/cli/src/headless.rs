//! Windowless runs for scripting and smoke tests.

use lane_defence_core::Outcome;
use lane_defence_simulation::{Simulation, TickInput};
use lane_defence_world::query;
use serde::Serialize;
use tracing::info;

use crate::args::PlantOrder;

/// Final state of a headless run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) seed: u64,
    pub(crate) ticks: u64,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) level: u32,
    pub(crate) score: u32,
    pub(crate) currency: u32,
    pub(crate) plants: usize,
    pub(crate) projectiles: usize,
    pub(crate) zombies: usize,
}

/// Plays up to `ticks` ticks, buying `orders` on the first one.
///
/// The run stops early once the game is over.
pub(crate) fn run(seed: u64, ticks: u64, orders: &[PlantOrder]) -> RunSummary {
    let mut simulation = Simulation::new(seed);
    let _ = simulation.start_run();

    let mut input = TickInput {
        presses: orders.iter().map(|order| order.press()).collect(),
        forfeit: false,
    };
    while query::tick_index(simulation.world()) < ticks
        && !query::is_game_over(simulation.world())
    {
        let _ = simulation.step(&input);
        input = TickInput::default();
    }

    let world = simulation.world();
    let economy = query::economy(world);
    let counts = query::entity_counts(world);
    let summary = RunSummary {
        seed,
        ticks: query::tick_index(world),
        outcome: query::outcome(world),
        level: economy.level,
        score: economy.score,
        currency: economy.currency,
        plants: counts.plants,
        projectiles: counts.projectiles,
        zombies: counts.zombies,
    };
    info!(ticks = summary.ticks, outcome = ?summary.outcome, "headless run finished");
    summary
}
