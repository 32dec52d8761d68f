//! Static tuning table for Lane Defence.
//!
//! Every gameplay number lives here. Values are compile-time constants and are
//! never edited while the game runs.

use crate::{PixelPoint, PixelRect, PixelSize};

/// Simulation tick rate measured in ticks per second.
pub const TICK_RATE: u32 = 60;

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: i32 = 800;

/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: i32 = 560;

/// Side length of a square grid tile in pixels.
pub const TILE_SIZE: i32 = 80;

/// Number of tile columns in every lane.
pub const GRID_COLUMNS: u32 = 10;

/// Number of lanes enemies advance along.
pub const LANE_COUNT: u32 = 6;

/// Screen row occupied by the first lane. Row zero hosts the HUD strip.
pub const FIRST_LANE_ROW: u32 = 1;

/// Enemies whose left edge passes this x-coordinate breach the defences.
pub const DEFENDED_BOUNDARY_X: i32 = -TILE_SIZE;

/// Currency available when a run starts.
pub const STARTING_CURRENCY: u32 = 200;

/// Price of a sunflower.
pub const SUNFLOWER_PRICE: u32 = 30;

/// Price of a peashooter.
pub const PEASHOOTER_PRICE: u32 = 50;

/// Starting health of a sunflower.
pub const SUNFLOWER_HP: i32 = 100;

/// Starting health of a peashooter.
pub const PEASHOOTER_HP: i32 = 200;

/// Currency credited by a sunflower each time its production timer elapses.
pub const SUNFLOWER_PAYOUT: u32 = 5;

/// Ticks between two sunflower payouts.
pub const SUNFLOWER_INTERVAL_TICKS: u32 = 25;

/// Ticks a peashooter must spend facing a target before it fires.
pub const PEASHOOTER_INTERVAL_TICKS: u32 = 25;

/// Extent shared by every plant.
pub const PLANT_EXTENT: PixelSize = PixelSize::new(TILE_SIZE, TILE_SIZE);

/// Offset from a peashooter's top-left corner to the spawn point of its peas.
pub const PEA_MUZZLE_OFFSET: PixelPoint = PixelPoint::new(60, 15);

/// Damage dealt by a single pea.
pub const PEA_DAMAGE: i32 = 50;

/// Horizontal distance a pea travels per tick.
pub const PEA_SPEED: i32 = 5;

/// Extent of a pea.
pub const PEA_EXTENT: PixelSize = PixelSize::new(24, 24);

/// Health a zombie spawns with.
pub const ZOMBIE_HP: i32 = 1000;

/// Damage a halted zombie deals to the plant it overlaps, per tick.
pub const ZOMBIE_DAMAGE: i32 = 2;

/// Horizontal distance a zombie walks per tick.
pub const ZOMBIE_SPEED: i32 = 1;

/// Extent of a zombie.
pub const ZOMBIE_EXTENT: PixelSize = PixelSize::new(TILE_SIZE, TILE_SIZE);

/// Spawn interval in ticks at level one.
pub const SPAWN_INTERVAL_BASE: u32 = 100;

/// Spawn interval reduction applied per level gained.
pub const SPAWN_INTERVAL_DECREMENT: u32 = 10;

/// Smallest spawn interval the scheduler may reach.
pub const SPAWN_INTERVAL_FLOOR: u32 = 50;

/// Fewest zombies a wave may contain.
pub const WAVE_SIZE_MIN: u32 = 1;

/// Most zombies a wave may contain.
pub const WAVE_SIZE_MAX: u32 = 3;

/// Distance between two candidate off-screen spawn columns.
pub const SPAWN_OFFSET_STEP: i32 = 100;

/// Number of candidate off-screen spawn columns.
pub const SPAWN_OFFSET_STEPS: i32 = 5;

/// Score-to-next-level required at level one.
pub const STARTING_SCORE_TO_NEXT_LEVEL: i32 = 100;

/// Score awarded for every zombie killed.
pub const SCORE_PER_KILL: u32 = 20;

/// Multiplier applied to the new level to derive its score requirement.
pub const NEXT_LEVEL_SCORE_MULTIPLIER: i32 = 100;

/// Highest level a run can reach. Clearing it wins the game.
pub const MAX_LEVEL: u32 = 5;

/// Centre of the "Rules" label on the start screen.
pub const RULES_BUTTON_CENTER: PixelPoint =
    PixelPoint::new(SCREEN_WIDTH / 2 - 67, SCREEN_HEIGHT / 2 + 127);

/// Clickable extent of the "Rules" label on the start screen.
pub const RULES_BUTTON_SIZE: PixelSize = PixelSize::new(120, 32);

/// Milliseconds the game-over screen ignores clicks for.
pub const GAME_OVER_INPUT_DELAY_MS: u64 = 1_000;

/// Most simulation ticks a single rendered frame may catch up on.
pub const MAX_TICKS_PER_FRAME: u32 = 5;

/// Clickable rectangle of the "Rules" label on the start screen.
#[must_use]
pub const fn rules_button() -> PixelRect {
    PixelRect::centered_on(RULES_BUTTON_CENTER, RULES_BUTTON_SIZE)
}

/// Spawn interval that applies at the provided level.
#[must_use]
pub const fn spawn_interval_for_level(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(SPAWN_INTERVAL_DECREMENT);
    let interval = SPAWN_INTERVAL_BASE.saturating_sub(reduction);
    if interval < SPAWN_INTERVAL_FLOOR {
        SPAWN_INTERVAL_FLOOR
    } else {
        interval
    }
}

/// Score requirement assigned when the provided level is entered.
#[must_use]
pub const fn score_requirement_for_level(level: u32) -> i32 {
    level as i32 * NEXT_LEVEL_SCORE_MULTIPLIER
}
