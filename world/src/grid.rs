//! Planting grid bookkeeping.

use lane_defence_core::{
    tunables::{GRID_COLUMNS, LANE_COUNT, TILE_SIZE},
    GridCoord, PixelPoint, PixelRect, PixelSize,
};

/// Static grid cell that tracks whether a plant may be placed on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    cell: GridCoord,
    plantable: bool,
}

impl Tile {
    fn new(cell: GridCoord) -> Self {
        Self {
            cell,
            plantable: true,
        }
    }

    /// Grid coordinate of the tile.
    #[must_use]
    pub const fn cell(&self) -> GridCoord {
        self.cell
    }

    /// Top-left pixel of the tile.
    #[must_use]
    pub const fn position(&self) -> PixelPoint {
        self.cell.origin()
    }

    /// Screen-space rectangle covered by the tile.
    #[must_use]
    pub const fn bounds(&self) -> PixelRect {
        PixelRect::from_origin_and_size(self.position(), PixelSize::new(TILE_SIZE, TILE_SIZE))
    }

    /// Reports whether no live plant occupies the tile.
    #[must_use]
    pub const fn is_plantable(&self) -> bool {
        self.plantable
    }

    /// Alternating checkerboard shade, used to pick the tile's sprite.
    #[must_use]
    pub const fn shade(&self) -> u32 {
        (self.cell.column() + self.cell.lane() + 1) % 2
    }
}

/// Dense lane-major grid of tiles.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    columns: u32,
    lanes: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    pub(crate) fn new() -> Self {
        let mut tiles = Vec::with_capacity((GRID_COLUMNS * LANE_COUNT) as usize);
        for lane in 0..LANE_COUNT {
            for column in 0..GRID_COLUMNS {
                tiles.push(Tile::new(GridCoord::new(column, lane)));
            }
        }

        Self {
            columns: GRID_COLUMNS,
            lanes: LANE_COUNT,
            tiles,
        }
    }

    pub(crate) fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tile(&self, cell: GridCoord) -> Option<&Tile> {
        self.index(cell).and_then(|index| self.tiles.get(index))
    }

    pub(crate) fn occupy(&mut self, cell: GridCoord) {
        self.set_plantable(cell, false);
    }

    pub(crate) fn vacate(&mut self, cell: GridCoord) {
        self.set_plantable(cell, true);
    }

    fn set_plantable(&mut self, cell: GridCoord, plantable: bool) {
        if let Some(index) = self.index(cell) {
            if let Some(tile) = self.tiles.get_mut(index) {
                tile.plantable = plantable;
            }
        }
    }

    fn index(&self, cell: GridCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.lane() < self.lanes {
            let lane = usize::try_from(cell.lane()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(lane * width + column)
        } else {
            None
        }
    }
}
