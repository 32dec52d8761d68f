//! Peas travelling down a lane.

use lane_defence_core::{
    tunables::{PEA_DAMAGE, PEA_EXTENT, PEA_SPEED, SCREEN_WIDTH},
    Event, PixelPoint, PixelRect,
};

use crate::{first_live_overlap, Entity, World};

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) position: PixelPoint,
    pub(crate) alive: bool,
    damage: i32,
    speed: i32,
}

impl Projectile {
    pub(crate) fn new(position: PixelPoint) -> Self {
        Self {
            position,
            alive: true,
            damage: PEA_DAMAGE,
            speed: PEA_SPEED,
        }
    }

    pub(crate) fn update(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        if !self.alive {
            return;
        }

        self.position.x += self.speed;
        if self.position.x > SCREEN_WIDTH {
            self.alive = false;
            return;
        }

        let bounds = self.bounds();
        let Some(zombie) = first_live_overlap(&bounds, &mut world.zombies) else {
            return;
        };

        self.alive = false;
        let died = zombie.take_damage(self.damage);
        let (zombie_id, remaining_hp) = (zombie.id, zombie.hp);
        if died {
            world.register_kill(zombie_id, out_events);
        } else {
            out_events.push(Event::ZombieStruck {
                zombie: zombie_id,
                remaining_hp,
            });
        }
    }
}

impl Entity for Projectile {
    fn bounds(&self) -> PixelRect {
        PixelRect::from_origin_and_size(self.position, PEA_EXTENT)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
