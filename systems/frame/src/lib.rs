#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame driver that owns the world and feeds it one frame at a time.

use std::time::Duration;

use bug_crossing_core::{Command, Direction, Event, FieldLayout, LayoutError};
use bug_crossing_rendering::{DrawTarget, Scene, SpriteInstance, SpriteKey};
use bug_crossing_system_spawning::{SpawnSource, Spawning};
use bug_crossing_world::{self as world, query, World};

/// Collaborator-facing surface of the game.
///
/// Every call applies one command and then pumps the spawning system until
/// it stops issuing commands, so callers never observe a parked enemy.
#[derive(Debug)]
pub struct FrameDriver<S> {
    world: World,
    spawning: Spawning<S>,
}

impl<S: SpawnSource> FrameDriver<S> {
    /// Creates a driver over a freshly configured field.
    pub fn new(layout: FieldLayout, source: S) -> Result<Self, LayoutError> {
        let world = World::new(layout.clone())?;
        let mut driver = Self {
            world,
            spawning: Spawning::new(source),
        };
        let _ = driver.submit(Command::ConfigureField { layout });
        Ok(driver)
    }

    /// Replaces the layout, resetting every entity.
    pub fn configure(&mut self, layout: FieldLayout) -> Vec<Event> {
        self.submit(Command::ConfigureField { layout })
    }

    /// Advances the game by `dt`, clamped to the layout's frame limit.
    pub fn on_frame(&mut self, dt: Duration) -> Vec<Event> {
        let limit = query::layout(&self.world).max_frame_seconds;
        let limit = Duration::try_from_secs_f32(limit).unwrap_or(Duration::MAX);
        let dt = if dt > limit {
            log::warn!("clamping frame delta {dt:?} to {limit:?}");
            limit
        } else {
            dt
        };
        self.submit(Command::Tick { dt })
    }

    /// Forwards a direction to the player.
    pub fn on_input(&mut self, direction: Direction) -> Vec<Event> {
        self.submit(Command::MovePlayer { direction })
    }

    /// Builds the scene for the current state: enemies first, then the player.
    #[must_use]
    pub fn scene(&self) -> Scene {
        let geometry = query::layout(&self.world).geometry;
        let enemies = query::enemy_view(&self.world);
        let mut sprites: Vec<SpriteInstance> = enemies
            .iter()
            .filter(|enemy| !enemy.parked)
            .map(|enemy| {
                let (x, y) = geometry.render_origin(enemy.position);
                SpriteInstance::new(SpriteKey::Enemy, x, y)
            })
            .collect();

        let (x, y) = geometry.render_origin(query::player(&self.world).position);
        sprites.push(SpriteInstance::new(SpriteKey::Player, x, y));
        Scene::new(sprites)
    }

    /// Issues one draw call per visible entity.
    pub fn render<T: DrawTarget + ?Sized>(&self, target: &mut T) {
        self.scene().draw(target);
    }

    /// Read-only access to the world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut log = Vec::new();
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);

        while !events.is_empty() {
            let mut commands = Vec::new();
            self.spawning
                .handle(&events, query::layout(&self.world), &mut commands);
            log.append(&mut events);
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }
        log
    }
}
