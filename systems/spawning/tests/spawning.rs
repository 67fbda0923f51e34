use std::{collections::VecDeque, time::Duration};

use bug_crossing_core::{
    CellSpan, Command, EnemyId, Event, FieldLayout, GridCell, SpeedRange,
};
use bug_crossing_system_spawning::{RandomSpawns, SpawnSource, Spawning};
use bug_crossing_world::{self as world, query, World};

#[derive(Debug, Default)]
struct ScriptedSpawns {
    picks: VecDeque<(i32, f32)>,
}

impl ScriptedSpawns {
    fn new(picks: &[(i32, f32)]) -> Self {
        Self {
            picks: picks.iter().copied().collect(),
        }
    }
}

impl SpawnSource for ScriptedSpawns {
    fn pick_row(&mut self, lanes: CellSpan) -> i32 {
        self.picks.front().map_or(lanes.first, |(row, _)| *row)
    }

    fn pick_speed(&mut self, range: SpeedRange) -> f32 {
        self.picks.pop_front().map_or(range.min, |(_, speed)| speed)
    }
}

fn pump<S: SpawnSource>(
    world: &mut World,
    spawning: &mut Spawning<S>,
    command: Command,
) -> Vec<Event> {
    let mut log = Vec::new();
    let mut events = Vec::new();
    world::apply(world, command, &mut events);

    while !events.is_empty() {
        log.extend(events.iter().cloned());
        let mut commands = Vec::new();
        spawning.handle(&events, query::layout(world), &mut commands);
        events.clear();
        for command in commands {
            world::apply(world, command, &mut events);
        }
    }
    log
}

#[test]
fn configure_spawns_every_enemy_from_script() {
    let layout = FieldLayout::default();
    let mut world = World::new(layout.clone()).expect("valid layout");
    let mut spawning = Spawning::new(ScriptedSpawns::new(&[(1, 1.0), (2, 2.0), (3, 3.0)]));

    let log = pump(&mut world, &mut spawning, Command::ConfigureField { layout });

    let spawned: Vec<_> = log
        .iter()
        .filter_map(|event| match event {
            Event::EnemySpawned { enemy, cell, speed } => Some((*enemy, *cell, *speed)),
            _ => None,
        })
        .collect();
    assert_eq!(
        spawned,
        vec![
            (EnemyId::new(0), GridCell::new(-1, 1), 101.0),
            (EnemyId::new(1), GridCell::new(-1, 2), 202.0),
            (EnemyId::new(2), GridCell::new(-1, 3), 303.0),
        ]
    );
    assert!(query::enemy_view(&world).iter().all(|enemy| !enemy.parked));
}

#[test]
fn escaped_enemy_reenters_at_spawn_column_within_speed_range() {
    let layout = FieldLayout {
        enemy_count: 1,
        ..FieldLayout::default()
    };
    let mut world = World::new(layout.clone()).expect("valid layout");
    let mut spawning = Spawning::new(RandomSpawns::from_seed(0x00c0_ffee));
    let _ = pump(&mut world, &mut spawning, Command::ConfigureField { layout });

    let mut respawn = None;
    for _ in 0..200 {
        let log = pump(
            &mut world,
            &mut spawning,
            Command::Tick {
                dt: Duration::from_millis(50),
            },
        );
        if log.iter().any(|event| matches!(event, Event::EnemyEscaped { .. })) {
            respawn = log.into_iter().find_map(|event| match event {
                Event::EnemySpawned { cell, speed, .. } => Some((cell, speed)),
                _ => None,
            });
            break;
        }
    }

    let (cell, speed) = respawn.expect("enemy escapes and respawns in the same pump");
    assert_eq!(cell.column(), -1);
    assert!(CellSpan::new(1, 3).contains(cell.row()));
    assert!((101.0..=303.0).contains(&speed), "speed {speed} out of range");

    let enemy = query::enemy_view(&world).into_vec()[0];
    assert!(!enemy.parked);
    assert_eq!(enemy.speed, speed);
}

#[test]
fn ignores_unrelated_events() {
    let mut spawning = Spawning::new(RandomSpawns::from_seed(1));
    let mut commands = Vec::new();
    spawning.handle(
        &[
            Event::TimeAdvanced {
                dt: Duration::from_millis(16),
            },
            Event::EnemyEscaped {
                enemy: EnemyId::new(0),
            },
        ],
        &FieldLayout::default(),
        &mut commands,
    );
    assert!(commands.is_empty());
}
