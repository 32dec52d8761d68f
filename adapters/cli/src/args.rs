//! Command-line arguments.

use std::{num::ParseIntError, path::PathBuf, str::FromStr};

use clap::Parser;
use lane_defence_core::{GridCoord, PlantKind, PointerButton, PointerPress};
use lane_defence_rendering_macroquad::DEFAULT_ASSET_ROOT;
use thiserror::Error;

/// Lane Defence: hold six lanes against waves of zombies.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", version)]
pub(crate) struct CliArgs {
    /// Seed for wave generation; picked at random when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Wait for the display refresh before presenting a frame (default).
    #[arg(long, overrides_with = "no_vsync")]
    pub(crate) vsync: bool,

    /// Render as fast as possible instead of waiting for the display refresh.
    #[arg(long, overrides_with = "vsync")]
    pub(crate) no_vsync: bool,

    /// Directory holding the images, sounds and fonts folders.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ASSET_ROOT)]
    pub(crate) assets: PathBuf,

    /// Run the simulation without a window and print a JSON summary.
    #[arg(long)]
    pub(crate) headless: bool,

    /// Number of ticks to simulate in headless mode.
    #[arg(long, default_value_t = 3_600, requires = "headless")]
    pub(crate) ticks: u64,

    /// Plant bought on the first headless tick, as COLUMN,LANE,KIND. Repeatable.
    #[arg(long = "plant", value_name = "COLUMN,LANE,KIND", requires = "headless")]
    pub(crate) plants: Vec<PlantOrder>,
}

impl CliArgs {
    /// Whether presentation should wait for the display refresh.
    pub(crate) fn vsync_enabled(&self) -> bool {
        self.vsync || !self.no_vsync
    }
}

/// Scripted purchase for headless runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlantOrder {
    pub(crate) cell: GridCoord,
    pub(crate) kind: PlantKind,
}

impl PlantOrder {
    /// Press that buys this plant through the regular planting controls.
    pub(crate) fn press(self) -> PointerPress {
        let button = match self.kind {
            PlantKind::Sunflower => PointerButton::Primary,
            PlantKind::Peashooter => PointerButton::Secondary,
        };
        PointerPress::new(self.cell.origin(), button)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum PlantOrderError {
    #[error("expected COLUMN,LANE,KIND")]
    Shape,
    #[error("invalid coordinate: {0}")]
    Coordinate(#[from] ParseIntError),
    #[error("unknown plant kind `{0}`")]
    Kind(String),
    #[error("cell ({column}, {lane}) is outside the grid")]
    OutOfGrid { column: u32, lane: u32 },
}

impl FromStr for PlantOrder {
    type Err = PlantOrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.split(',');
        let (Some(column), Some(lane), Some(kind), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(PlantOrderError::Shape);
        };

        let column: u32 = column.trim().parse()?;
        let lane: u32 = lane.trim().parse()?;
        let kind = PlantKind::from_name(kind)
            .ok_or_else(|| PlantOrderError::Kind(kind.trim().to_owned()))?;
        let cell = GridCoord::new(column, lane);
        if !cell.is_within_grid() {
            return Err(PlantOrderError::OutOfGrid { column, lane });
        }

        Ok(Self { cell, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_a_window() {
        let args = CliArgs::try_parse_from(["lane-defence"]).expect("parse");

        assert!(!args.headless);
        assert!(args.vsync_enabled());
        assert_eq!(args.seed, None);
        assert_eq!(args.assets, PathBuf::from("assets"));
    }

    #[test]
    fn headless_run_accepts_plant_orders() {
        let args = CliArgs::try_parse_from([
            "lane-defence",
            "--headless",
            "--seed",
            "4",
            "--ticks",
            "10",
            "--plant",
            "0,2,sunflower",
            "--plant",
            "3,5,Peashooter",
        ])
        .expect("parse");

        assert_eq!(args.seed, Some(4));
        assert_eq!(args.ticks, 10);
        assert_eq!(
            args.plants,
            vec![
                PlantOrder {
                    cell: GridCoord::new(0, 2),
                    kind: PlantKind::Sunflower,
                },
                PlantOrder {
                    cell: GridCoord::new(3, 5),
                    kind: PlantKind::Peashooter,
                },
            ]
        );
    }

    #[test]
    fn last_vsync_flag_wins() {
        let off =
            CliArgs::try_parse_from(["lane-defence", "--vsync", "--no-vsync"]).expect("parse");
        let on =
            CliArgs::try_parse_from(["lane-defence", "--no-vsync", "--vsync"]).expect("parse");

        assert!(!off.vsync_enabled());
        assert!(on.vsync_enabled());
    }

    #[test]
    fn plant_orders_need_headless_mode() {
        assert!(CliArgs::try_parse_from(["lane-defence", "--plant", "0,0,sunflower"]).is_err());
    }

    #[test]
    fn malformed_plant_orders_are_rejected() {
        assert_eq!("1,2".parse::<PlantOrder>(), Err(PlantOrderError::Shape));
        assert_eq!(
            "1,2,cactus".parse::<PlantOrder>(),
            Err(PlantOrderError::Kind("cactus".to_owned()))
        );
        assert_eq!(
            "10,0,sunflower".parse::<PlantOrder>(),
            Err(PlantOrderError::OutOfGrid { column: 10, lane: 0 })
        );
        assert!(matches!(
            "x,0,sunflower".parse::<PlantOrder>(),
            Err(PlantOrderError::Coordinate(_))
        ));
    }

    #[test]
    fn orders_press_inside_their_cell() {
        let order = PlantOrder {
            cell: GridCoord::new(4, 1),
            kind: PlantKind::Peashooter,
        };
        let press = order.press();

        assert_eq!(press.button, PointerButton::Secondary);
        assert_eq!(GridCoord::containing(press.point), Some(order.cell));
    }
}
