#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for planning zombie waves.

use lane_defence_core::{
    tunables::{LANE_COUNT, SPAWN_OFFSET_STEP, SPAWN_OFFSET_STEPS, WAVE_SIZE_MAX, WAVE_SIZE_MIN},
    Command, Event, ZombieSpawn,
};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration seeding the wave generator.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }

    /// Seed the wave generator starts from.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Pure system that answers due waves with spawn commands.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes world events and emits one wave for every `WaveDue`.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if matches!(event, Event::WaveDue) {
                out.push(Command::SpawnWave {
                    spawns: self.plan_wave(),
                });
            }
        }
    }

    /// Emits a wave unconditionally, used when a run begins on an empty field.
    pub fn opening_wave(&mut self, out: &mut Vec<Command>) {
        out.push(Command::SpawnWave {
            spawns: self.plan_wave(),
        });
    }

    fn plan_wave(&mut self) -> Vec<ZombieSpawn> {
        let size = self.rng.gen_range(WAVE_SIZE_MIN..=WAVE_SIZE_MAX);
        let mut free_lanes: Vec<u32> = (0..LANE_COUNT).collect();
        let mut spawns = Vec::with_capacity(size as usize);

        for _ in 0..size {
            let Some(&lane) = free_lanes.choose(&mut self.rng) else {
                break;
            };
            free_lanes.retain(|candidate| *candidate != lane);

            let steps = self.rng.gen_range(1..=SPAWN_OFFSET_STEPS);
            spawns.push(ZombieSpawn::new(lane, steps * SPAWN_OFFSET_STEP));
        }

        spawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waves_respect_size_and_offset_ranges() {
        let mut spawning = Spawning::new(Config::new(7));

        for _ in 0..500 {
            let wave = spawning.plan_wave();
            let size = wave.len() as u32;
            assert!((WAVE_SIZE_MIN..=WAVE_SIZE_MAX).contains(&size));
            for spawn in &wave {
                assert!(spawn.lane < LANE_COUNT);
                assert_eq!(spawn.offset % SPAWN_OFFSET_STEP, 0);
                let steps = spawn.offset / SPAWN_OFFSET_STEP;
                assert!((1..=SPAWN_OFFSET_STEPS).contains(&steps));
            }
        }
    }

    #[test]
    fn lanes_within_a_wave_are_distinct() {
        let mut spawning = Spawning::new(Config::new(0xdead_beef));

        for _ in 0..500 {
            let mut lanes: Vec<u32> = spawning.plan_wave().iter().map(|spawn| spawn.lane).collect();
            let len = lanes.len();
            lanes.sort_unstable();
            lanes.dedup();
            assert_eq!(lanes.len(), len, "a lane was claimed twice");
        }
    }

    #[test]
    fn every_wave_size_eventually_occurs() {
        let mut spawning = Spawning::new(Config::new(11));
        let mut seen = [false; 3];

        for _ in 0..200 {
            seen[spawning.plan_wave().len() - 1] = true;
        }

        assert_eq!(seen, [true, true, true]);
    }
}
