#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Defence.
//!
//! The world owns the planting grid, every entity collection and the economy
//! counters. It is mutated exclusively through [`apply`], which reports what
//! happened as [`Event`] values, and inspected through the read-only
//! [`query`] module.

mod economy;
mod grid;
mod plants;
mod projectiles;
mod zombies;

use std::mem;

use lane_defence_core::{
    tunables::LANE_COUNT, Command, Event, GridCoord, Outcome, PixelRect, PlacementError, PlantId,
    PlantKind, ZombieId, ZombieSpawn,
};

use economy::{Economy, KillOutcome};
use grid::Grid;
use plants::Plant;
use projectiles::Projectile;
use zombies::Zombie;

pub use grid::Tile;

/// Shared capability of everything that occupies space on the field.
pub(crate) trait Entity {
    /// Screen-space rectangle used for collision tests.
    fn bounds(&self) -> PixelRect;

    /// Reports whether the entity still takes part in the simulation.
    fn is_alive(&self) -> bool;
}

/// Returns the first live candidate, in collection order, overlapping `bounds`.
pub(crate) fn first_live_overlap<'a, E: Entity>(
    bounds: &PixelRect,
    candidates: &'a mut [E],
) -> Option<&'a mut E> {
    candidates
        .iter_mut()
        .find(|candidate| candidate.is_alive() && candidate.bounds().overlaps(bounds))
}

fn prune<E: Entity>(entities: &mut Vec<E>) {
    entities.retain(Entity::is_alive);
}

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    plants: Vec<Plant>,
    projectiles: Vec<Projectile>,
    fired: Vec<Projectile>,
    zombies: Vec<Zombie>,
    economy: Economy,
    spawn_timer: u32,
    outcome: Option<Outcome>,
    horde_announced: bool,
    next_plant_id: u32,
    next_zombie_id: u32,
    tick_index: u64,
}

impl World {
    /// Creates a new world with an empty field and starting balances.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            plants: Vec::new(),
            projectiles: Vec::new(),
            fired: Vec::new(),
            zombies: Vec::new(),
            economy: Economy::new(),
            spawn_timer: 0,
            outcome: None,
            horde_announced: false,
            next_plant_id: 0,
            next_zombie_id: 0,
            tick_index: 0,
        }
    }

    pub(crate) fn credit_currency(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        let balance = self.economy.credit(amount);
        out_events.push(Event::CurrencyCredited { amount, balance });
    }

    pub(crate) fn register_kill(&mut self, zombie: ZombieId, out_events: &mut Vec<Event>) {
        let progress = self.economy.register_kill();
        out_events.push(Event::ZombieKilled {
            zombie,
            score: self.economy.score,
        });

        match progress {
            KillOutcome::Scored => {}
            KillOutcome::LevelAdvanced => out_events.push(Event::LevelAdvanced {
                level: self.economy.level,
                score_to_next_level: self.economy.score_to_next_level,
                spawn_threshold: self.economy.spawn_threshold,
            }),
            KillOutcome::FinalLevelCleared => self.finish(out_events),
        }
    }

    /// Ends the run, classifying it by the level reached. Later calls are no-ops.
    pub(crate) fn finish(&mut self, out_events: &mut Vec<Event>) {
        if self.outcome.is_some() {
            return;
        }

        let outcome = Outcome::from_level(self.economy.level);
        self.outcome = Some(outcome);
        out_events.push(Event::GameOver { outcome });
    }

    fn place_plant(&mut self, kind: PlantKind, cell: GridCoord) -> Result<PlantId, PlacementError> {
        if self.outcome.is_some() {
            return Err(PlacementError::GameOver);
        }

        let tile = self.grid.tile(cell).ok_or(PlacementError::OutOfBounds)?;
        if !tile.is_plantable() {
            return Err(PlacementError::Occupied);
        }

        self.economy.spend(kind.price())?;
        self.grid.occupy(cell);

        let id = PlantId::new(self.next_plant_id);
        self.next_plant_id = self.next_plant_id.wrapping_add(1);
        self.plants.push(Plant::new(id, kind, cell));
        Ok(id)
    }

    fn spawn_wave(&mut self, spawns: Vec<ZombieSpawn>, out_events: &mut Vec<Event>) {
        let mut placed = 0;
        for spawn in spawns.into_iter().filter(|spawn| spawn.lane < LANE_COUNT) {
            let id = ZombieId::new(self.next_zombie_id);
            self.next_zombie_id = self.next_zombie_id.wrapping_add(1);
            self.zombies.push(Zombie::new(id, spawn.lane, spawn.origin()));
            placed += 1;
        }

        out_events.push(Event::WaveSpawned { zombies: placed });
        if placed > 0 && !self.horde_announced {
            self.horde_announced = true;
            out_events.push(Event::HordeApproaching);
        }
    }

    fn advance(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        let mut plants = mem::take(&mut self.plants);
        for plant in &mut plants {
            plant.update(self, out_events);
        }
        prune(&mut plants);
        self.plants = plants;

        // Peas fired during the plant pass join after the projectile pass.
        let mut projectiles = mem::take(&mut self.projectiles);
        for projectile in &mut projectiles {
            projectile.update(self, out_events);
        }
        prune(&mut projectiles);
        projectiles.append(&mut self.fired);
        self.projectiles = projectiles;

        let mut zombies = mem::take(&mut self.zombies);
        for zombie in &mut zombies {
            zombie.update(self, out_events);
        }
        prune(&mut zombies);
        self.zombies = zombies;

        if self.outcome.is_some() {
            return;
        }

        self.spawn_timer = self.spawn_timer.saturating_add(1);
        if self.spawn_timer >= self.economy.spawn_threshold {
            self.spawn_timer = 0;
            out_events.push(Event::WaveDue);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlacePlant { kind, cell } => match world.place_plant(kind, cell) {
            Ok(plant) => out_events.push(Event::PlantPlaced { plant, kind, cell }),
            Err(reason) => out_events.push(Event::PlacementRejected { kind, cell, reason }),
        },
        Command::CreditCurrency { amount } => world.credit_currency(amount, out_events),
        Command::Tick => {
            if world.outcome.is_none() {
                world.advance(out_events);
            }
        }
        Command::SpawnWave { spawns } => {
            if world.outcome.is_none() {
                world.spawn_wave(spawns, out_events);
            }
        }
        Command::Forfeit => world.finish(out_events),
        Command::Reset => {
            *world = World::new();
            out_events.push(Event::WorldReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Entity, Tile, World};
    use lane_defence_core::{GridCoord, Outcome, PixelRect, PlantId, PlantKind, ZombieId};

    /// Provides read-only access to every tile of the planting grid, lane by lane.
    #[must_use]
    pub fn tiles(world: &World) -> &[Tile] {
        world.grid.tiles()
    }

    /// Retrieves the tile at the provided cell, if it lies on the grid.
    #[must_use]
    pub fn tile(world: &World, cell: GridCoord) -> Option<&Tile> {
        world.grid.tile(cell)
    }

    /// Reports whether a plant could currently be placed on the cell, ignoring cost.
    #[must_use]
    pub fn is_plantable(world: &World, cell: GridCoord) -> bool {
        world.grid.tile(cell).is_some_and(Tile::is_plantable)
    }

    /// Captures a read-only view of the live plants in placement order.
    #[must_use]
    pub fn plant_view(world: &World) -> PlantView {
        let snapshots = world
            .plants
            .iter()
            .filter(|plant| plant.is_alive())
            .map(|plant| PlantSnapshot {
                id: plant.id,
                kind: plant.kind,
                cell: plant.cell,
                bounds: plant.bounds(),
                hp: plant.hp,
            })
            .collect();
        PlantView { snapshots }
    }

    /// Captures the bounds of every live projectile, oldest first.
    #[must_use]
    pub fn projectile_view(world: &World) -> Vec<PixelRect> {
        world
            .projectiles
            .iter()
            .filter(|projectile| projectile.is_alive())
            .map(Entity::bounds)
            .collect()
    }

    /// Captures a read-only view of the live zombies in spawn order.
    #[must_use]
    pub fn zombie_view(world: &World) -> ZombieView {
        let snapshots = world
            .zombies
            .iter()
            .filter(|zombie| zombie.is_alive())
            .map(|zombie| ZombieSnapshot {
                id: zombie.id,
                lane: zombie.lane,
                bounds: zombie.bounds(),
                hp: zombie.hp,
                halted: zombie.halted,
            })
            .collect();
        ZombieView { snapshots }
    }

    /// Captures the economy and progression counters.
    #[must_use]
    pub fn economy(world: &World) -> EconomySnapshot {
        EconomySnapshot {
            currency: world.economy.currency,
            score: world.economy.score,
            level: world.economy.level,
            score_to_next_level: world.economy.score_to_next_level,
            spawn_timer: world.spawn_timer,
            spawn_threshold: world.economy.spawn_threshold,
        }
    }

    /// Counts the entries held by each entity collection, including entities
    /// that died this tick and await pruning.
    #[must_use]
    pub fn entity_counts(world: &World) -> EntityCounts {
        EntityCounts {
            plants: world.plants.len(),
            projectiles: world.projectiles.len() + world.fired.len(),
            zombies: world.zombies.len(),
        }
    }

    /// Outcome of the run, once it has ended.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Reports whether the run has ended.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.outcome.is_some()
    }

    /// Number of ticks simulated since the world was created or reset.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Read-only snapshot describing all live plants.
    #[derive(Clone, Debug)]
    pub struct PlantView {
        snapshots: Vec<PlantSnapshot>,
    }

    impl PlantView {
        /// Iterator over the captured plant snapshots in placement order.
        pub fn iter(&self) -> impl Iterator<Item = &PlantSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        pub fn into_vec(self) -> Vec<PlantSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single plant.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PlantSnapshot {
        /// Unique identifier assigned to the plant.
        pub id: PlantId,
        /// Kind of the plant.
        pub kind: PlantKind,
        /// Cell the plant occupies.
        pub cell: GridCoord,
        /// Screen-space extent of the plant.
        pub bounds: PixelRect,
        /// Remaining health.
        pub hp: i32,
    }

    /// Read-only snapshot describing all live zombies.
    #[derive(Clone, Debug)]
    pub struct ZombieView {
        snapshots: Vec<ZombieSnapshot>,
    }

    impl ZombieView {
        /// Iterator over the captured zombie snapshots in spawn order.
        pub fn iter(&self) -> impl Iterator<Item = &ZombieSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        pub fn into_vec(self) -> Vec<ZombieSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single zombie.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ZombieSnapshot {
        /// Unique identifier assigned to the zombie.
        pub id: ZombieId,
        /// Lane the zombie walks along.
        pub lane: u32,
        /// Screen-space extent of the zombie.
        pub bounds: PixelRect,
        /// Remaining health.
        pub hp: i32,
        /// Whether the zombie stood still this tick because it is eating.
        pub halted: bool,
    }

    /// Economy and progression counters at a point in time.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EconomySnapshot {
        /// Currency available for purchases.
        pub currency: u32,
        /// Accumulated score.
        pub score: u32,
        /// Current level, starting at 1.
        pub level: u32,
        /// Score still required to leave the current level.
        pub score_to_next_level: i32,
        /// Ticks elapsed since the last wave became due.
        pub spawn_timer: u32,
        /// Ticks between two waves at the current level.
        pub spawn_threshold: u32,
    }

    /// Number of entries held by each entity collection.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EntityCounts {
        /// Plants on the field.
        pub plants: usize,
        /// Peas in flight, including those fired this tick.
        pub projectiles: usize,
        /// Zombies on the field or waiting off-screen.
        pub zombies: usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{
        lane_top,
        tunables::{MAX_LEVEL, SCORE_PER_KILL},
        PixelPoint,
    };

    fn tick(world: &mut World, events: &mut Vec<Event>) {
        apply(world, Command::Tick, events);
    }

    #[test]
    fn fresh_world_starts_with_initial_counters() {
        let world = World::new();
        let economy = query::economy(&world);

        assert_eq!(economy.currency, 200);
        assert_eq!(economy.score, 0);
        assert_eq!(economy.level, 1);
        assert_eq!(economy.score_to_next_level, 100);
        assert_eq!(economy.spawn_threshold, 100);
        assert_eq!(query::outcome(&world), None);
        assert_eq!(query::tiles(&world).len(), 60);
    }

    #[test]
    fn final_kill_on_last_level_wins() {
        let mut world = World::new();
        world.economy.level = MAX_LEVEL;
        world.economy.score_to_next_level = SCORE_PER_KILL as i32;
        let mut events = Vec::new();

        world.register_kill(ZombieId::new(4), &mut events);

        assert_eq!(query::outcome(&world), Some(Outcome::Victory));
        assert_eq!(
            events,
            vec![
                Event::ZombieKilled {
                    zombie: ZombieId::new(4),
                    score: SCORE_PER_KILL,
                },
                Event::GameOver {
                    outcome: Outcome::Victory
                },
            ]
        );
    }

    #[test]
    fn breach_on_last_level_counts_as_victory() {
        let mut world = World::new();
        world.economy.level = MAX_LEVEL;
        world.zombies.push(Zombie::new(
            ZombieId::new(0),
            0,
            PixelPoint::new(-80, lane_top(0)),
        ));
        let mut events = Vec::new();

        tick(&mut world, &mut events);

        assert_eq!(query::outcome(&world), Some(Outcome::Victory));
    }

    #[test]
    fn finish_is_reported_once() {
        let mut world = World::new();
        let mut events = Vec::new();

        world.finish(&mut events);
        world.finish(&mut events);
        apply(&mut world, Command::Forfeit, &mut events);

        assert_eq!(
            events,
            vec![Event::GameOver {
                outcome: Outcome::Defeat
            }]
        );
    }

    #[test]
    fn kill_mid_tick_advances_level() {
        let mut world = World::new();
        world.economy.score_to_next_level = SCORE_PER_KILL as i32;
        let mut zombie = Zombie::new(ZombieId::new(0), 0, PixelPoint::new(400, lane_top(0)));
        zombie.hp = 50;
        world.zombies.push(zombie);
        world
            .projectiles
            .push(Projectile::new(PixelPoint::new(372, lane_top(0) + 15)));
        let mut events = Vec::new();

        tick(&mut world, &mut events);

        assert!(events.contains(&Event::LevelAdvanced {
            level: 2,
            score_to_next_level: 200,
            spawn_threshold: 90,
        }));
        assert!(query::zombie_view(&world).into_vec().is_empty());
        assert!(query::projectile_view(&world).is_empty());
    }

    #[test]
    fn first_overlap_skips_dead_and_keeps_order() {
        let mut zombies = vec![
            Zombie::new(ZombieId::new(0), 0, PixelPoint::new(100, lane_top(0))),
            Zombie::new(ZombieId::new(1), 0, PixelPoint::new(110, lane_top(0))),
            Zombie::new(ZombieId::new(2), 0, PixelPoint::new(120, lane_top(0))),
        ];
        zombies[0].alive = false;
        let probe = PixelRect::from_origin_and_size(
            PixelPoint::new(150, lane_top(0)),
            lane_defence_core::PixelSize::new(10, 10),
        );

        let hit = first_live_overlap(&probe, &mut zombies).map(|zombie| zombie.id);

        assert_eq!(hit, Some(ZombieId::new(1)));
    }
}
