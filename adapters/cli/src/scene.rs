//! Rebuilds the rendering scene from the game flow each frame.

use lane_defence_rendering::{
    HudPresentation, PlantPresentation, ProjectilePresentation, Scene, SceneScreen,
    TilePresentation, ZombiePresentation,
};
use lane_defence_simulation::{GameFlow, Screen};
use lane_defence_world::query;

/// Overwrites `scene` with the flow's current screen and world snapshot.
///
/// Audio requests and the exit flag are left to the caller.
pub(crate) fn populate(scene: &mut Scene, flow: &GameFlow) {
    scene.screen = match flow.screen() {
        Screen::Start => SceneScreen::Start,
        Screen::Rules => SceneScreen::Rules,
        Screen::Running => SceneScreen::Playing,
        Screen::GameOver { outcome, score } => SceneScreen::GameOver { outcome, score },
    };

    scene.tiles.clear();
    scene.plants.clear();
    scene.projectiles.clear();
    scene.zombies.clear();
    if scene.screen != SceneScreen::Playing {
        return;
    }

    let world = flow.simulation().world();
    scene.tiles.extend(
        query::tiles(world)
            .iter()
            .map(|tile| TilePresentation::new(tile.bounds(), tile.shade())),
    );
    scene.plants.extend(
        query::plant_view(world)
            .iter()
            .map(|plant| PlantPresentation::new(plant.kind, plant.bounds)),
    );
    scene.projectiles.extend(
        query::projectile_view(world)
            .into_iter()
            .map(ProjectilePresentation::new),
    );
    scene.zombies.extend(
        query::zombie_view(world)
            .iter()
            .map(|zombie| ZombiePresentation::new(zombie.bounds)),
    );

    let economy = query::economy(world);
    scene.hud = HudPresentation {
        currency: economy.currency,
        level: economy.level,
        score: economy.score,
        score_to_next_level: economy.score_to_next_level,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{PixelPoint, PointerButton, PointerPress};
    use lane_defence_rendering::SpriteKey;
    use lane_defence_simulation::FlowInput;
    use std::time::Duration;

    fn start_run(flow: &mut GameFlow) {
        let click = [PointerPress::new(PixelPoint::new(700, 100), PointerButton::Primary)];
        let _ = flow.advance(
            Duration::ZERO,
            FlowInput {
                presses: &click,
                ..FlowInput::default()
            },
        );
    }

    #[test]
    fn start_screen_has_no_field() {
        let flow = GameFlow::new(2);
        let mut scene = Scene::new();

        populate(&mut scene, &flow);

        assert_eq!(scene.screen, SceneScreen::Start);
        assert!(scene.tiles.is_empty());
        assert!(scene.zombies.is_empty());
    }

    #[test]
    fn running_screen_mirrors_the_world() {
        let mut flow = GameFlow::new(2);
        start_run(&mut flow);
        let mut scene = Scene::new();

        populate(&mut scene, &flow);

        assert_eq!(scene.screen, SceneScreen::Playing);
        assert_eq!(scene.tiles.len(), 60);
        assert_eq!(scene.tiles[0].sprite, SpriteKey::GrassDark);
        assert_eq!(scene.tiles[1].sprite, SpriteKey::GrassLight);
        assert!(!scene.zombies.is_empty(), "opening wave is visible");
        let zombies = query::zombie_view(flow.simulation().world()).into_vec();
        assert_eq!(scene.zombies[0].bounds, zombies[0].bounds);
        assert_eq!(scene.hud.currency, 200);
        assert_eq!(scene.hud.level, 1);
        assert_eq!(scene.hud.score_to_next_level, 100);
    }

    #[test]
    fn leaving_the_run_clears_stale_entities() {
        let mut flow = GameFlow::new(2);
        start_run(&mut flow);
        let mut scene = Scene::new();
        populate(&mut scene, &flow);

        let _ = flow.advance(
            Duration::from_millis(20),
            FlowInput {
                forfeit: true,
                ..FlowInput::default()
            },
        );
        populate(&mut scene, &flow);

        assert!(matches!(scene.screen, SceneScreen::GameOver { .. }));
        assert!(scene.tiles.is_empty());
        assert!(scene.zombies.is_empty());
    }
}
