#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Bug Crossing.

mod entity;
mod movable;

use bug_crossing_core::{
    Command, Direction, EnemyId, Event, FieldLayout, LayoutError, RespawnCause, WELCOME_BANNER,
};

use self::entity::{Entity, InputOutcome};

/// Represents the authoritative Bug Crossing world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    layout: FieldLayout,
    enemies: Vec<Entity>,
    player: Entity,
    tick_index: u64,
}

impl World {
    /// Creates a world laid out according to `layout`.
    ///
    /// Every enemy starts parked; apply [`Command::ConfigureField`] to
    /// broadcast the initial spawn requests.
    pub fn new(layout: FieldLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        let (player, enemies) = populate(&layout)?;
        Ok(Self {
            banner: WELCOME_BANNER,
            layout,
            enemies,
            player,
            tick_index: 0,
        })
    }

    fn respawn_player(&mut self, cause: RespawnCause, out_events: &mut Vec<Event>) {
        self.player.respawn_player(&self.layout);
        log::debug!("player respawned ({cause:?})");
        out_events.push(Event::PlayerRespawned {
            cause,
            cell: self.layout.player_start,
        });
    }

    fn step(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        for enemy in &mut self.enemies {
            if enemy.step_enemy(dt) {
                if let Some(id) = enemy.enemy_id() {
                    out_events.push(Event::EnemyEscaped { enemy: id });
                    out_events.push(Event::SpawnRequested { enemy: id });
                }
            }
        }

        self.player.step_player(dt);

        let geometry = self.layout.geometry;
        let player_position = self.player.position();
        let collided = self
            .enemies
            .iter()
            .filter(|enemy| enemy.is_active())
            .find(|enemy| geometry.has_collided(player_position, enemy.position()))
            .and_then(Entity::enemy_id);
        if let Some(enemy) = collided {
            out_events.push(Event::PlayerCollided { enemy });
            self.respawn_player(RespawnCause::Collision, out_events);
        }
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        match self.player.handle_input(direction, &self.layout) {
            InputOutcome::Queued => out_events.push(Event::PlayerMoveQueued { direction }),
            InputOutcome::Rejected => {
                log::debug!("player step {direction} would leave the field");
                out_events.push(Event::PlayerMoveRejected { direction });
            }
            InputOutcome::Goal => {
                log::info!("player reached the goal row");
                out_events.push(Event::PlayerRespawned {
                    cause: RespawnCause::Goal,
                    cell: self.layout.player_start,
                });
            }
        }
    }

    fn respawn_enemy(
        &mut self,
        enemy: EnemyId,
        row: i32,
        speed: f32,
        out_events: &mut Vec<Event>,
    ) {
        if !self.layout.enemy_lanes.contains(row) || !(speed.is_finite() && speed > 0.0) {
            log::debug!(
                "ignoring respawn of enemy {} at row {row} speed {speed}",
                enemy.get()
            );
            return;
        }

        let Some(entity) = self
            .enemies
            .iter_mut()
            .find(|entity| entity.enemy_id() == Some(enemy))
        else {
            log::debug!("ignoring respawn of unknown enemy {}", enemy.get());
            return;
        };
        if let Some(cell) = entity.respawn_enemy(row, speed, &self.layout) {
            out_events.push(Event::EnemySpawned { enemy, cell, speed });
        }
    }
}

fn populate(layout: &FieldLayout) -> Result<(Entity, Vec<Entity>), LayoutError> {
    let player = Entity::player(layout)?;
    let enemies = (0..layout.enemy_count)
        .map(|index| Entity::enemy(EnemyId::new(index), layout))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((player, enemies))
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureField { layout } => {
            let populated = layout.validate().and_then(|()| populate(&layout));
            match populated {
                Ok((player, enemies)) => {
                    world.layout = layout;
                    world.player = player;
                    world.enemies = enemies;
                    world.tick_index = 0;

                    out_events.push(Event::PlayerRespawned {
                        cause: RespawnCause::Configured,
                        cell: world.layout.player_start,
                    });
                    for enemy in world.enemies.iter().filter_map(Entity::enemy_id) {
                        out_events.push(Event::SpawnRequested { enemy });
                    }
                }
                Err(reason) => {
                    log::warn!("rejected field layout: {reason}");
                    out_events.push(Event::ConfigurationRejected { reason });
                }
            }
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            world.step(dt.as_secs_f32(), out_events);
        }
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::RespawnEnemy { enemy, row, speed } => {
            world.respawn_enemy(enemy, row, speed, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use bug_crossing_core::{CellSpan, EnemyId, FieldLayout, GridCell, Position};

    use super::{entity::Behaviour, Entity, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the active layout.
    #[must_use]
    pub fn layout(world: &World) -> &FieldLayout {
        &world.layout
    }

    /// Number of ticks applied since the field was last configured.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let entity = &world.player;
        let geometry = &world.layout.geometry;
        let bounds = entity.movable().bounds();
        PlayerSnapshot {
            position: entity.position(),
            cell: geometry.cell_at(entity.position()),
            moving: entity.movable().is_moving(),
            pending: entity.movable().has_pending(),
            columns: bounds.cell_columns(geometry),
            rows: bounds.cell_rows(geometry),
        }
    }

    /// Captures a read-only view of every enemy, ordered by identifier.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let mut snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .filter_map(|entity| enemy_snapshot(world, entity))
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        EnemyView { snapshots }
    }

    fn enemy_snapshot(world: &World, entity: &Entity) -> Option<EnemySnapshot> {
        let Behaviour::Enemy { id, speed, parked } = entity.behaviour() else {
            return None;
        };
        Some(EnemySnapshot {
            id,
            position: entity.position(),
            cell: world.layout.geometry.cell_at(entity.position()),
            speed,
            parked,
        })
    }

    /// Immutable representation of the player used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Logical pixel position.
        pub position: Position,
        /// Cell containing the position.
        pub cell: GridCell,
        /// Whether a movement is in flight.
        pub moving: bool,
        /// Whether a movement waits in the pending slot.
        pub pending: bool,
        /// Columns the player may rest in.
        pub columns: CellSpan,
        /// Rows the player may rest in.
        pub rows: CellSpan,
    }

    /// Immutable representation of a single enemy used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemySnapshot {
        /// Unique identifier assigned to the enemy.
        pub id: EnemyId,
        /// Logical pixel position.
        pub position: Position,
        /// Cell containing the position.
        pub cell: GridCell,
        /// Horizontal speed in pixels per second.
        pub speed: f32,
        /// Whether the enemy waits for a respawn.
        pub parked: bool,
    }

    /// Read-only snapshot describing all enemies.
    #[derive(Clone, Debug, Default)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured enemy snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<EnemySnapshot> {
            self.snapshots
        }
    }
}
