use lane_defence_core::{tunables::SCREEN_WIDTH, Command, Event};
use lane_defence_system_spawning::{Config, Spawning};
use lane_defence_world::{self as world, query, World};

fn collect_waves(seed: u64, count: usize) -> Vec<Command> {
    let mut spawning = Spawning::new(Config::new(seed));
    let mut commands = Vec::new();
    for _ in 0..count {
        spawning.handle(&[Event::WaveDue], &mut commands);
    }
    commands
}

#[test]
fn same_seed_replays_the_same_waves() {
    assert_eq!(collect_waves(42, 32), collect_waves(42, 32));
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(collect_waves(1, 32), collect_waves(2, 32));
}

#[test]
fn only_due_waves_are_answered() {
    let mut spawning = Spawning::new(Config::new(3));
    let mut commands = Vec::new();

    spawning.handle(
        &[
            Event::TimeAdvanced { tick: 1 },
            Event::WaveDue,
            Event::HordeApproaching,
            Event::WaveDue,
        ],
        &mut commands,
    );

    assert_eq!(commands.len(), 2, "expected one wave per WaveDue event");
    assert!(commands
        .iter()
        .all(|command| matches!(command, Command::SpawnWave { .. })));
}

#[test]
fn opening_wave_is_unconditional() {
    let mut spawning = Spawning::new(Config::new(5));
    let mut commands = Vec::new();

    spawning.opening_wave(&mut commands);

    match commands.as_slice() {
        [Command::SpawnWave { spawns }] => assert!(!spawns.is_empty()),
        other => panic!("unexpected commands emitted: {other:?}"),
    }
}

#[test]
fn due_wave_lands_off_screen_in_the_world() {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::new(0x1234_5678));
    let mut events = Vec::new();
    let mut commands = Vec::new();

    let threshold = query::economy(&world).spawn_threshold;
    for _ in 0..threshold {
        world::apply(&mut world, Command::Tick, &mut events);
    }
    assert!(events.contains(&Event::WaveDue), "wave due after threshold");

    spawning.handle(&events, &mut commands);
    events.clear();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    let zombies = query::zombie_view(&world).into_vec();
    assert!((1..=3).contains(&zombies.len()));
    assert!(zombies
        .iter()
        .all(|zombie| zombie.bounds.origin().x > SCREEN_WIDTH));
    assert!(events.contains(&Event::HordeApproaching));
}
