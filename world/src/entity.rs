//! A single concrete entity type whose role is picked by a behaviour tag.

use bug_crossing_core::{
    Direction, EnemyId, FieldLayout, GridCell, Heading, LayoutError, Movement, Position,
};

use crate::movable::Movable;

/// Role-specific state layered over the shared [`Movable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Behaviour {
    /// Cruises right along a lane and is recycled once it leaves its bounds.
    Enemy {
        id: EnemyId,
        speed: f32,
        parked: bool,
    },
    /// Steps one cell per input and resets on collision or at the goal.
    Player,
}

/// Result of forwarding a direction to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputOutcome {
    Queued,
    Rejected,
    Goal,
}

#[derive(Clone, Debug)]
pub(crate) struct Entity {
    movable: Movable,
    behaviour: Behaviour,
}

impl Entity {
    pub(crate) fn player(layout: &FieldLayout) -> Result<Self, LayoutError> {
        Ok(Self {
            movable: Movable::new(layout.player_start_position(), layout.player_bounds()?),
            behaviour: Behaviour::Player,
        })
    }

    /// Creates a parked enemy waiting at the spawn column of the first lane.
    pub(crate) fn enemy(id: EnemyId, layout: &FieldLayout) -> Result<Self, LayoutError> {
        let cell = GridCell::new(layout.enemy_spawn_column(), layout.enemy_lanes.first);
        Ok(Self {
            movable: Movable::new(layout.geometry.cell_origin(cell), layout.enemy_bounds()?),
            behaviour: Behaviour::Enemy {
                id,
                speed: 0.0,
                parked: true,
            },
        })
    }

    pub(crate) fn movable(&self) -> &Movable {
        &self.movable
    }

    pub(crate) fn position(&self) -> Position {
        self.movable.position()
    }

    pub(crate) fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    pub(crate) fn enemy_id(&self) -> Option<EnemyId> {
        match self.behaviour {
            Behaviour::Enemy { id, .. } => Some(id),
            Behaviour::Player => None,
        }
    }

    /// Reports whether the entity takes part in collisions.
    pub(crate) fn is_active(&self) -> bool {
        !matches!(self.behaviour, Behaviour::Enemy { parked: true, .. })
    }

    pub(crate) fn step_player(&mut self, dt: f32) {
        self.movable.update(dt);
    }

    /// Advances a cruising enemy, returning `true` when it just escaped.
    ///
    /// An escaped enemy is parked in place until it is respawned.
    pub(crate) fn step_enemy(&mut self, dt: f32) -> bool {
        let Behaviour::Enemy { parked: false, .. } = self.behaviour else {
            return false;
        };
        self.movable.update(dt);

        let escaped = self.movable.position().x > self.movable.bounds().max_x();
        if escaped {
            self.park();
        }
        escaped
    }

    fn park(&mut self) {
        if let Behaviour::Enemy { parked, .. } = &mut self.behaviour {
            *parked = true;
        }
        let position = self.movable.position();
        self.movable.place(position);
    }

    pub(crate) fn respawn_player(&mut self, layout: &FieldLayout) {
        self.movable.place(layout.player_start_position());
    }

    /// Places an enemy at the spawn column of `row` cruising right at `speed`.
    ///
    /// Returns the spawn cell, or `None` when the entity is not an enemy.
    pub(crate) fn respawn_enemy(
        &mut self,
        row: i32,
        speed: f32,
        layout: &FieldLayout,
    ) -> Option<GridCell> {
        let Behaviour::Enemy { id, .. } = self.behaviour else {
            return None;
        };

        let cell = GridCell::new(layout.enemy_spawn_column(), row);
        self.movable.place(layout.geometry.cell_origin(cell));
        self.behaviour = Behaviour::Enemy {
            id,
            speed,
            parked: false,
        };

        let cruise = Movement::horizontal(Heading::Positive, speed, None);
        if !self.movable.queue_movement(cruise, &layout.geometry) {
            log::debug!("enemy {} has no room to cruise from {cell:?}", id.get());
        }
        Some(cell)
    }

    /// Queues one grid step, or reports the goal.
    ///
    /// The goal needs the player at rest on the first playable row. While a
    /// step is in flight, legality is judged from the cell it ends in.
    pub(crate) fn handle_input(
        &mut self,
        direction: Direction,
        layout: &FieldLayout,
    ) -> InputOutcome {
        let geometry = &layout.geometry;
        let row = geometry.px_to_rows(self.movable.resting_position().y);
        let at_rest = !self.movable.is_moving();
        if direction == Direction::Up && at_rest && row <= layout.player_rows.first {
            self.respawn_player(layout);
            return InputOutcome::Goal;
        }

        let step = Movement::single_cell(direction, layout.player_speed, geometry);
        if self.movable.queue_movement(step, geometry) {
            InputOutcome::Queued
        } else {
            InputOutcome::Rejected
        }
    }
}
