#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems and the simulation loop react to deterministically.

pub mod tunables;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title shown by windowed adapters.
pub const WINDOW_TITLE: &str = "Lane Defence";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests a plant of the given kind on the provided grid cell.
    PlacePlant {
        /// Kind of plant to buy.
        kind: PlantKind,
        /// Cell the plant should occupy.
        cell: GridCoord,
    },
    /// Adds currency to the player's balance.
    CreditCurrency {
        /// Amount to add.
        amount: u32,
    },
    /// Advances the simulation by exactly one fixed tick.
    Tick,
    /// Places a batch of zombies off-screen at the defended side.
    SpawnWave {
        /// Zombies composing the wave, in placement order.
        spawns: Vec<ZombieSpawn>,
    },
    /// Ends the current run at the player's request.
    Forfeit,
    /// Restores the world to its initial state.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that one simulation tick completed.
    TimeAdvanced {
        /// Number of ticks elapsed since the last reset.
        tick: u64,
    },
    /// Confirms that a plant was bought and placed.
    PlantPlaced {
        /// Identifier assigned to the plant.
        plant: PlantId,
        /// Kind of plant placed.
        kind: PlantKind,
        /// Cell the plant occupies.
        cell: GridCoord,
    },
    /// Reports that a placement request was rejected without changing state.
    PlacementRejected {
        /// Kind of plant requested.
        kind: PlantKind,
        /// Cell provided in the request.
        cell: GridCoord,
        /// Reason the request failed.
        reason: PlacementError,
    },
    /// Reports that currency was added to the balance.
    CurrencyCredited {
        /// Amount credited.
        amount: u32,
        /// Balance after crediting.
        balance: u32,
    },
    /// Reports that a plant launched a projectile.
    ProjectileFired {
        /// Plant that fired.
        plant: PlantId,
    },
    /// Reports that a projectile hit a zombie that survived.
    ZombieStruck {
        /// Zombie that was hit.
        zombie: ZombieId,
        /// Health left after the hit.
        remaining_hp: i32,
    },
    /// Reports that a zombie died.
    ZombieKilled {
        /// Zombie that died.
        zombie: ZombieId,
        /// Score after the kill was registered.
        score: u32,
    },
    /// Reports that a plant was eaten and its tile freed.
    PlantDestroyed {
        /// Plant that died.
        plant: PlantId,
        /// Cell that became plantable again.
        cell: GridCoord,
    },
    /// Announces that the player advanced to a new level.
    LevelAdvanced {
        /// Level entered.
        level: u32,
        /// Score still required to leave the new level.
        score_to_next_level: i32,
        /// Spawn interval in force from now on.
        spawn_threshold: u32,
    },
    /// Announces that the spawn timer elapsed and a wave should be planned.
    WaveDue,
    /// Confirms that a wave of zombies entered the field.
    WaveSpawned {
        /// Number of zombies placed.
        zombies: u32,
    },
    /// One-shot cue emitted with the first wave after a (re)start.
    HordeApproaching,
    /// Announces that the run ended.
    GameOver {
        /// How the run ended.
        outcome: Outcome,
    },
    /// Confirms that the world returned to its initial state.
    WorldReset,
}

/// Kinds of plants the player can buy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    /// Producer that credits currency on a fixed interval.
    Sunflower,
    /// Attacker that fires peas down its lane.
    Peashooter,
}

impl PlantKind {
    /// Every purchasable plant kind.
    pub const ALL: [PlantKind; 2] = [PlantKind::Sunflower, PlantKind::Peashooter];

    /// Currency required to buy the plant.
    #[must_use]
    pub const fn price(self) -> u32 {
        match self {
            Self::Sunflower => tunables::SUNFLOWER_PRICE,
            Self::Peashooter => tunables::PEASHOOTER_PRICE,
        }
    }

    /// Health the plant is placed with.
    #[must_use]
    pub const fn max_hp(self) -> i32 {
        match self {
            Self::Sunflower => tunables::SUNFLOWER_HP,
            Self::Peashooter => tunables::PEASHOOTER_HP,
        }
    }

    /// Ticks between two activations of the plant's behaviour.
    #[must_use]
    pub const fn interval_ticks(self) -> u32 {
        match self {
            Self::Sunflower => tunables::SUNFLOWER_INTERVAL_TICKS,
            Self::Peashooter => tunables::PEASHOOTER_INTERVAL_TICKS,
        }
    }

    /// Parses the lowercase plant name used on the command line.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sunflower" => Some(Self::Sunflower),
            "peashooter" => Some(Self::Peashooter),
            _ => None,
        }
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The final level was cleared.
    Victory,
    /// The defences were breached or the run was abandoned early.
    Defeat,
}

impl Outcome {
    /// Classifies a finished run from the level it ended on.
    ///
    /// A run that ends on the final level counts as a victory regardless of
    /// what ended it.
    #[must_use]
    pub const fn from_level(level: u32) -> Self {
        if level >= tunables::MAX_LEVEL {
            Self::Victory
        } else {
            Self::Defeat
        }
    }
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies outside the lanes.
    #[error("cell lies outside the planting grid")]
    OutOfBounds,
    /// A live plant already occupies the cell.
    #[error("tile is already occupied")]
    Occupied,
    /// The balance does not cover the plant's price.
    #[error("plant costs {price} but only {available} is available")]
    InsufficientCurrency {
        /// Price of the requested plant.
        price: u32,
        /// Balance at the time of the request.
        available: u32,
    },
    /// The run already ended.
    #[error("the run is over")]
    GameOver,
}

/// Unique identifier assigned to a plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlantId(u32);

impl PlantId {
    /// Creates a new plant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a zombie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZombieId(u32);

impl ZombieId {
    /// Creates a new zombie identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a planting tile expressed as column and lane indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    column: u32,
    lane: u32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(column: u32, lane: u32) -> Self {
        Self { column, lane }
    }

    /// Zero-based column index, counted from the defended side.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based lane index.
    #[must_use]
    pub const fn lane(&self) -> u32 {
        self.lane
    }

    /// Reports whether the coordinate addresses a tile of the planting grid.
    #[must_use]
    pub const fn is_within_grid(&self) -> bool {
        self.column < tunables::GRID_COLUMNS && self.lane < tunables::LANE_COUNT
    }

    /// Top-left pixel of the tile addressed by the coordinate.
    #[must_use]
    pub const fn origin(&self) -> PixelPoint {
        PixelPoint::new(
            self.column as i32 * tunables::TILE_SIZE,
            lane_top(self.lane),
        )
    }

    /// Resolves the grid cell whose tile contains the provided pixel.
    ///
    /// Returns `None` for pixels above, below, or beside the lanes.
    #[must_use]
    pub fn containing(point: PixelPoint) -> Option<Self> {
        let column = point.x.div_euclid(tunables::TILE_SIZE);
        let row = point.y.div_euclid(tunables::TILE_SIZE);
        let first_row = tunables::FIRST_LANE_ROW as i32;
        if column < 0 || row < first_row {
            return None;
        }

        let cell = Self::new(
            u32::try_from(column).ok()?,
            u32::try_from(row - first_row).ok()?,
        );
        cell.is_within_grid().then_some(cell)
    }
}

/// Pixel y-coordinate of the top edge of the provided lane.
#[must_use]
pub const fn lane_top(lane: u32) -> i32 {
    (lane + tunables::FIRST_LANE_ROW) as i32 * tunables::TILE_SIZE
}

/// Point in logical screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal coordinate, growing to the right.
    pub x: i32,
    /// Vertical coordinate, growing downwards.
    pub y: i32,
}

impl PixelPoint {
    /// Creates a new pixel point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point shifted by the provided offset.
    #[must_use]
    pub const fn offset_by(self, offset: PixelPoint) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

/// Width and height in logical screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl PixelSize {
    /// Creates a new pixel size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box in logical screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    origin: PixelPoint,
    size: PixelSize,
}

impl PixelRect {
    /// Constructs a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: PixelPoint, size: PixelSize) -> Self {
        Self { origin, size }
    }

    /// Constructs a rectangle of the given size centred on the provided point.
    #[must_use]
    pub const fn centered_on(center: PixelPoint, size: PixelSize) -> Self {
        Self::from_origin_and_size(
            PixelPoint::new(center.x - size.width / 2, center.y - size.height / 2),
            size,
        )
    }

    /// Top-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> PixelPoint {
        self.origin
    }

    /// Dimensions of the rectangle.
    #[must_use]
    pub const fn size(&self) -> PixelSize {
        self.size
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.origin.x + self.size.width
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.origin.y + self.size.height
    }

    /// Reports whether two rectangles share interior area. Touching edges do
    /// not count as overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &PixelRect) -> bool {
        self.origin.x < other.right()
            && other.origin.x < self.right()
            && self.origin.y < other.bottom()
            && other.origin.y < self.bottom()
    }

    /// Reports whether the point lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, point: PixelPoint) -> bool {
        point.x >= self.origin.x
            && point.x < self.right()
            && point.y >= self.origin.y
            && point.y < self.bottom()
    }
}

/// Placement order for a single zombie of a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZombieSpawn {
    /// Lane the zombie walks along.
    pub lane: u32,
    /// Extra distance beyond the right screen edge the zombie starts at.
    pub offset: i32,
}

impl ZombieSpawn {
    /// Creates a new spawn order.
    #[must_use]
    pub const fn new(lane: u32, offset: i32) -> Self {
        Self { lane, offset }
    }

    /// Top-left pixel the zombie is placed at.
    #[must_use]
    pub const fn origin(&self) -> PixelPoint {
        PixelPoint::new(tunables::SCREEN_WIDTH + self.offset, lane_top(self.lane))
    }
}

/// Pointer buttons the game distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    /// Left mouse button.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button.
    Middle,
}

/// A pointer press observed by an adapter, in logical screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerPress {
    /// Location of the press.
    pub point: PixelPoint,
    /// Button that was pressed.
    pub button: PointerButton,
}

impl PointerPress {
    /// Creates a new pointer press.
    #[must_use]
    pub const fn new(point: PixelPoint, button: PointerButton) -> Self {
        Self { point, button }
    }
}

/// Background tracks the game can loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Soundtrack {
    /// Title music played from the start screen onwards.
    Background,
}

/// One-shot sound cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// First wave of a run entered the field.
    HordeApproaching,
    /// The run was won.
    Victory,
    /// The run was lost.
    Defeat,
}

/// Audio work requested by the game flow and carried out by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioRequest {
    /// Start looping the provided track.
    PlayMusic(Soundtrack),
    /// Stop whatever track is playing.
    StopMusic,
    /// Play a one-shot cue.
    PlayCue(AudioCue),
}
