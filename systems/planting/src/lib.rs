#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure planting system responsible for turning pointer presses into placement commands.

use lane_defence_core::{Command, Event, GridCoord, PlantKind, PointerButton, PointerPress};

/// Resolves which plant a pointer button buys, if any.
#[must_use]
pub const fn plant_for_button(button: PointerButton) -> Option<PlantKind> {
    match button {
        PointerButton::Primary => Some(PlantKind::Sunflower),
        PointerButton::Secondary => Some(PlantKind::Peashooter),
        PointerButton::Middle => None,
    }
}

/// Planting system that translates pointer presses into placement commands.
#[derive(Debug, Clone)]
pub struct Planting {
    accepting: bool,
}

impl Default for Planting {
    fn default() -> Self {
        Self::new()
    }
}

impl Planting {
    /// Creates a new planting system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { accepting: true }
    }

    /// Consumes world events and pointer presses to emit placement commands.
    ///
    /// Presses outside the lanes are dropped here; occupancy and cost are left
    /// for the world to validate.
    pub fn handle(&mut self, events: &[Event], presses: &[PointerPress], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameOver { .. } => self.accepting = false,
                Event::WorldReset => self.accepting = true,
                _ => {}
            }
        }

        if !self.accepting {
            return;
        }

        for press in presses {
            let Some(kind) = plant_for_button(press.button) else {
                continue;
            };
            let Some(cell) = GridCoord::containing(press.point) else {
                continue;
            };
            out.push(Command::PlacePlant { kind, cell });
        }
    }
}
