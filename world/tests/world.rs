use lane_defence_core::{
    tunables::{PEA_SPEED, SUNFLOWER_INTERVAL_TICKS, SUNFLOWER_PAYOUT},
    Command, Event, GridCoord, Outcome, PixelPoint, PlacementError, PlantKind, ZombieSpawn,
};
use lane_defence_world::{self as world, query, World};

fn place(world: &mut World, kind: PlantKind, cell: GridCoord) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::PlacePlant { kind, cell }, &mut events);
    events
}

fn spawn(world: &mut World, spawns: Vec<ZombieSpawn>) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::SpawnWave { spawns }, &mut events);
    events
}

fn run_ticks(world: &mut World, ticks: u32) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        world::apply(world, Command::Tick, &mut events);
    }
    events
}

#[test]
fn placement_deducts_price_and_claims_tile() {
    let mut world = World::new();
    let cell = GridCoord::new(0, 0);

    let events = place(&mut world, PlantKind::Sunflower, cell);

    assert_eq!(query::economy(&world).currency, 170);
    assert!(!query::is_plantable(&world, cell));
    assert!(matches!(
        events.as_slice(),
        [Event::PlantPlaced {
            kind: PlantKind::Sunflower,
            ..
        }]
    ));
}

#[test]
fn placement_on_occupied_tile_changes_nothing() {
    let mut world = World::new();
    let cell = GridCoord::new(4, 3);
    let _ = place(&mut world, PlantKind::Peashooter, cell);
    let currency = query::economy(&world).currency;

    let events = place(&mut world, PlantKind::Sunflower, cell);

    assert_eq!(query::economy(&world).currency, currency);
    assert_eq!(query::entity_counts(&world).plants, 1);
    assert_eq!(
        events,
        vec![Event::PlacementRejected {
            kind: PlantKind::Sunflower,
            cell,
            reason: PlacementError::Occupied,
        }]
    );
}

#[test]
fn placement_without_funds_is_rejected() {
    let mut world = World::new();
    for column in 0..4 {
        let _ = place(&mut world, PlantKind::Peashooter, GridCoord::new(column, 0));
    }
    assert_eq!(query::economy(&world).currency, 0);

    let events = place(&mut world, PlantKind::Sunflower, GridCoord::new(5, 0));

    assert_eq!(query::entity_counts(&world).plants, 4);
    assert!(query::is_plantable(&world, GridCoord::new(5, 0)));
    assert_eq!(
        events,
        vec![Event::PlacementRejected {
            kind: PlantKind::Sunflower,
            cell: GridCoord::new(5, 0),
            reason: PlacementError::InsufficientCurrency {
                price: 30,
                available: 0,
            },
        }]
    );
}

#[test]
fn placement_outside_grid_is_rejected() {
    let mut world = World::new();

    let events = place(&mut world, PlantKind::Sunflower, GridCoord::new(10, 0));

    assert_eq!(query::economy(&world).currency, 200);
    assert!(matches!(
        events.as_slice(),
        [Event::PlacementRejected {
            reason: PlacementError::OutOfBounds,
            ..
        }]
    ));
}

#[test]
fn sunflower_income_matches_elapsed_intervals() {
    let mut world = World::new();
    let _ = place(&mut world, PlantKind::Sunflower, GridCoord::new(0, 5));

    let ticks = 99;
    let _ = run_ticks(&mut world, ticks);

    let payments = ticks / SUNFLOWER_INTERVAL_TICKS;
    assert_eq!(
        query::economy(&world).currency,
        170 + payments * SUNFLOWER_PAYOUT
    );
}

#[test]
fn fired_peas_first_move_on_the_following_tick() {
    let mut world = World::new();
    let _ = place(&mut world, PlantKind::Peashooter, GridCoord::new(0, 1));
    let _ = spawn(&mut world, vec![ZombieSpawn::new(1, -200)]);

    let events = run_ticks(&mut world, 25);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ProjectileFired { .. })));
    let peas = query::projectile_view(&world);
    assert_eq!(peas.len(), 1);
    assert_eq!(peas[0].origin(), PixelPoint::new(60, 175));

    let _ = run_ticks(&mut world, 1);
    let peas = query::projectile_view(&world);
    assert_eq!(peas[0].origin(), PixelPoint::new(60 + PEA_SPEED, 175));
}

#[test]
fn zombie_crossing_the_boundary_loses_the_run() {
    let mut world = World::new();
    let _ = spawn(&mut world, vec![ZombieSpawn::new(0, -879)]);

    let events = run_ticks(&mut world, 1);
    assert_eq!(query::outcome(&world), None);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::GameOver { .. })));

    let events = run_ticks(&mut world, 1);
    assert_eq!(query::outcome(&world), Some(Outcome::Defeat));
    assert!(events.contains(&Event::GameOver {
        outcome: Outcome::Defeat
    }));
}

#[test]
fn eaten_plant_frees_tile_and_releases_zombie() {
    let mut world = World::new();
    let cell = GridCoord::new(2, 0);
    let _ = place(&mut world, PlantKind::Sunflower, cell);
    let _ = spawn(&mut world, vec![ZombieSpawn::new(0, -561)]);

    let _ = run_ticks(&mut world, 1);
    let zombie = query::zombie_view(&world).into_vec()[0];
    assert!(zombie.halted, "zombie should stop at the plant");
    assert_eq!(zombie.bounds.origin().x, 238);

    let events = run_ticks(&mut world, 49);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::PlantDestroyed { cell: freed, .. } if *freed == cell
    )));
    assert!(query::is_plantable(&world, cell));
    assert!(query::plant_view(&world).into_vec().is_empty());

    let _ = run_ticks(&mut world, 1);
    let zombie = query::zombie_view(&world).into_vec()[0];
    assert!(!zombie.halted);
    assert_eq!(zombie.bounds.origin().x, 237);
    assert_eq!(query::entity_counts(&world).plants, 0);
}

#[test]
fn spawn_timer_raises_wave_due_at_threshold() {
    let mut world = World::new();

    let events = run_ticks(&mut world, 99);
    assert!(!events.contains(&Event::WaveDue));

    let events = run_ticks(&mut world, 1);
    assert!(events.contains(&Event::WaveDue));
    assert_eq!(query::economy(&world).spawn_timer, 0);
}

#[test]
fn horde_cue_accompanies_only_the_first_wave() {
    let mut world = World::new();

    let first = spawn(&mut world, vec![ZombieSpawn::new(0, 100), ZombieSpawn::new(3, 300)]);
    let second = spawn(&mut world, vec![ZombieSpawn::new(1, 200)]);

    assert_eq!(
        first,
        vec![Event::WaveSpawned { zombies: 2 }, Event::HordeApproaching]
    );
    assert_eq!(second, vec![Event::WaveSpawned { zombies: 1 }]);
    assert_eq!(query::entity_counts(&world).zombies, 3);
}

#[test]
fn finished_run_ignores_ticks_waves_and_placements() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::Forfeit, &mut events);
    assert_eq!(
        events,
        vec![Event::GameOver {
            outcome: Outcome::Defeat
        }]
    );

    assert!(run_ticks(&mut world, 10).is_empty());
    assert!(spawn(&mut world, vec![ZombieSpawn::new(0, 100)]).is_empty());
    let events = place(&mut world, PlantKind::Sunflower, GridCoord::new(0, 0));
    assert!(matches!(
        events.as_slice(),
        [Event::PlacementRejected {
            reason: PlacementError::GameOver,
            ..
        }]
    ));
    assert_eq!(query::tick_index(&world), 0);
}

#[test]
fn reset_restores_initial_state() {
    let mut world = World::new();
    let _ = place(&mut world, PlantKind::Peashooter, GridCoord::new(1, 1));
    let _ = spawn(&mut world, vec![ZombieSpawn::new(1, 100)]);
    let _ = run_ticks(&mut world, 30);
    let mut events = Vec::new();
    world::apply(&mut world, Command::Forfeit, &mut events);

    events.clear();
    world::apply(&mut world, Command::Reset, &mut events);

    assert_eq!(events, vec![Event::WorldReset]);
    assert_eq!(query::outcome(&world), None);
    assert_eq!(query::economy(&world), query::economy(&World::new()));
    assert_eq!(
        query::entity_counts(&world),
        query::entity_counts(&World::new())
    );
    assert!(query::tiles(&world).iter().all(|tile| tile.is_plantable()));

    let again = spawn(&mut world, vec![ZombieSpawn::new(2, 100)]);
    assert!(again.contains(&Event::HordeApproaching), "cue re-arms after reset");
}
