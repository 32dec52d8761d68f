//! Stationary producer and attacker units.

use lane_defence_core::{
    tunables::{PEA_MUZZLE_OFFSET, PLANT_EXTENT, SCREEN_WIDTH, SUNFLOWER_PAYOUT},
    Event, GridCoord, PixelRect, PlantId, PlantKind,
};

use crate::{projectiles::Projectile, zombies::Zombie, Entity, World};

#[derive(Clone, Debug)]
pub(crate) struct Plant {
    pub(crate) id: PlantId,
    pub(crate) kind: PlantKind,
    pub(crate) cell: GridCoord,
    pub(crate) hp: i32,
    pub(crate) alive: bool,
    timer: u32,
}

impl Plant {
    pub(crate) fn new(id: PlantId, kind: PlantKind, cell: GridCoord) -> Self {
        Self {
            id,
            kind,
            cell,
            hp: kind.max_hp(),
            alive: true,
            timer: 0,
        }
    }

    pub(crate) fn update(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        if !self.alive {
            return;
        }

        match self.kind {
            PlantKind::Sunflower => self.produce(world, out_events),
            PlantKind::Peashooter => self.guard_lane(world, out_events),
        }
    }

    /// Applies `damage` and reports whether the plant died from it.
    pub(crate) fn take_damage(&mut self, damage: i32) -> bool {
        self.hp -= damage;
        if self.hp <= 0 {
            self.alive = false;
        }
        !self.alive
    }

    fn produce(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        self.timer += 1;
        if self.timer >= self.kind.interval_ticks() {
            world.credit_currency(SUNFLOWER_PAYOUT, out_events);
            self.timer = 0;
        }
    }

    fn guard_lane(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        if !world.zombies.iter().any(|zombie| self.faces(zombie)) {
            return;
        }

        self.timer += 1;
        if self.timer >= self.kind.interval_ticks() {
            let muzzle = self.cell.origin().offset_by(PEA_MUZZLE_OFFSET);
            world.fired.push(Projectile::new(muzzle));
            out_events.push(Event::ProjectileFired { plant: self.id });
            self.timer = 0;
        }
    }

    /// A zombie is a target while it walks the same lane, has entered the
    /// screen, and is still ahead of the plant.
    fn faces(&self, zombie: &Zombie) -> bool {
        let origin = self.cell.origin();
        zombie.alive
            && zombie.lane == self.cell.lane()
            && zombie.position.x < SCREEN_WIDTH
            && zombie.position.x > origin.x
    }
}

impl Entity for Plant {
    fn bounds(&self) -> PixelRect {
        PixelRect::from_origin_and_size(self.cell.origin(), PLANT_EXTENT)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
