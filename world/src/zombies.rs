//! Walkers that advance toward the defended side and eat plants in the way.

use lane_defence_core::{
    tunables::{DEFENDED_BOUNDARY_X, ZOMBIE_DAMAGE, ZOMBIE_EXTENT, ZOMBIE_HP, ZOMBIE_SPEED},
    Event, PixelPoint, PixelRect, ZombieId,
};

use crate::{first_live_overlap, Entity, World};

#[derive(Clone, Debug)]
pub(crate) struct Zombie {
    pub(crate) id: ZombieId,
    pub(crate) lane: u32,
    pub(crate) position: PixelPoint,
    pub(crate) hp: i32,
    pub(crate) alive: bool,
    pub(crate) halted: bool,
    damage: i32,
    speed: i32,
}

impl Zombie {
    pub(crate) fn new(id: ZombieId, lane: u32, position: PixelPoint) -> Self {
        Self {
            id,
            lane,
            position,
            hp: ZOMBIE_HP,
            alive: true,
            halted: false,
            damage: ZOMBIE_DAMAGE,
            speed: ZOMBIE_SPEED,
        }
    }

    pub(crate) fn update(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        if !self.alive {
            return;
        }

        if !self.halted {
            self.position.x -= self.speed;
            if self.position.x < DEFENDED_BOUNDARY_X {
                world.finish(out_events);
                return;
            }
        }

        // Halting is re-derived from contact every tick.
        self.halted = false;
        let bounds = self.bounds();
        let Some(plant) = first_live_overlap(&bounds, &mut world.plants) else {
            return;
        };

        self.halted = true;
        if plant.take_damage(self.damage) {
            self.halted = false;
            let (plant_id, cell) = (plant.id, plant.cell);
            world.grid.vacate(cell);
            out_events.push(Event::PlantDestroyed {
                plant: plant_id,
                cell,
            });
        }
    }

    /// Applies `damage` and reports whether the zombie died from it.
    pub(crate) fn take_damage(&mut self, damage: i32) -> bool {
        self.hp -= damage;
        if self.hp <= 0 {
            self.alive = false;
        }
        !self.alive
    }
}

impl Entity for Zombie {
    fn bounds(&self) -> PixelRect {
        PixelRect::from_origin_and_size(self.position, ZOMBIE_EXTENT)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plants::Plant;
    use lane_defence_core::{lane_top, GridCoord, Outcome, PlantId, PlantKind};

    fn zombie_at(x: i32) -> Zombie {
        Zombie::new(ZombieId::new(7), 0, PixelPoint::new(x, lane_top(0)))
    }

    #[test]
    fn walks_left_while_unobstructed() {
        let mut world = World::new();
        let mut zombie = zombie_at(500);
        let mut events = Vec::new();

        for _ in 0..10 {
            zombie.update(&mut world, &mut events);
        }

        assert_eq!(zombie.position.x, 500 - 10 * ZOMBIE_SPEED);
        assert!(!zombie.halted);
        assert!(events.is_empty());
    }

    #[test]
    fn crossing_the_boundary_ends_the_run() {
        let mut world = World::new();
        let mut zombie = zombie_at(DEFENDED_BOUNDARY_X);
        let mut events = Vec::new();

        zombie.update(&mut world, &mut events);

        assert_eq!(world.outcome, Some(Outcome::Defeat));
        assert_eq!(
            events,
            vec![Event::GameOver {
                outcome: Outcome::Defeat
            }]
        );
    }

    #[test]
    fn contact_halts_and_chews_through_the_plant() {
        let mut world = World::new();
        let cell = GridCoord::new(2, 0);
        world.grid.occupy(cell);
        world
            .plants
            .push(Plant::new(PlantId::new(3), PlantKind::Sunflower, cell));
        // One step left of the plant's right edge once it moves.
        let mut zombie = zombie_at(cell.origin().x + 80);
        let mut events = Vec::new();

        zombie.update(&mut world, &mut events);
        assert!(zombie.halted);
        assert_eq!(world.plants[0].hp, PlantKind::Sunflower.max_hp() - ZOMBIE_DAMAGE);

        let bites = PlantKind::Sunflower.max_hp() / ZOMBIE_DAMAGE;
        for _ in 1..bites {
            zombie.update(&mut world, &mut events);
        }

        assert!(!world.plants[0].alive);
        assert!(!zombie.halted, "a dead plant releases its eater");
        assert_eq!(zombie.position.x, cell.origin().x + 79);
        assert_eq!(world.grid.tile(cell).map(|tile| tile.is_plantable()), Some(true));
        assert_eq!(
            events,
            vec![Event::PlantDestroyed {
                plant: PlantId::new(3),
                cell,
            }]
        );

        zombie.update(&mut world, &mut events);
        assert_eq!(zombie.position.x, cell.origin().x + 78);
    }

    #[test]
    fn straddling_two_plants_bites_only_the_first_in_order() {
        let mut world = World::new();
        let (right, left) = (GridCoord::new(1, 0), GridCoord::new(0, 0));
        world
            .plants
            .push(Plant::new(PlantId::new(0), PlantKind::Peashooter, right));
        world
            .plants
            .push(Plant::new(PlantId::new(1), PlantKind::Sunflower, left));
        let mut zombie = zombie_at(right.origin().x);
        let mut events = Vec::new();

        zombie.update(&mut world, &mut events);

        assert_eq!(zombie.position.x, right.origin().x - 1, "covers both tiles");
        assert!(zombie.halted);
        assert_eq!(world.plants[0].hp, PlantKind::Peashooter.max_hp() - ZOMBIE_DAMAGE);
        assert_eq!(world.plants[1].hp, PlantKind::Sunflower.max_hp());

        world.plants[0].alive = false;
        zombie.update(&mut world, &mut events);

        assert!(zombie.halted);
        assert_eq!(world.plants[1].hp, PlantKind::Sunflower.max_hp() - ZOMBIE_DAMAGE);
    }

    #[test]
    fn plants_in_other_lanes_are_ignored() {
        let mut world = World::new();
        world.plants.push(Plant::new(
            PlantId::new(0),
            PlantKind::Peashooter,
            GridCoord::new(2, 1),
        ));
        let mut zombie = zombie_at(200);
        let mut events = Vec::new();

        zombie.update(&mut world, &mut events);

        assert!(!zombie.halted);
        assert_eq!(world.plants[0].hp, PlantKind::Peashooter.max_hp());
    }
}
