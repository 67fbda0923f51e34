//! Position plus a single active movement and a single pending slot.

use bug_crossing_core::{Bounds, GridGeometry, Movement, Position};

/// Motion state machine shared by every entity.
///
/// The entity is idle while `active` is empty. A pending movement is only
/// promoted at the start of an update, and a newly queued movement always
/// replaces the pending one.
#[derive(Clone, Debug)]
pub(crate) struct Movable {
    position: Position,
    bounds: Bounds,
    anchor: Position,
    active: Option<Movement>,
    pending: Option<Movement>,
}

impl Movable {
    pub(crate) fn new(position: Position, bounds: Bounds) -> Self {
        Self {
            position,
            bounds,
            anchor: position,
            active: None,
            pending: None,
        }
    }

    pub(crate) fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub(crate) fn is_moving(&self) -> bool {
        self.active.is_some()
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Position the entity comes to rest at once the active movement completes.
    ///
    /// Uncapped axes keep their current coordinate.
    pub(crate) fn resting_position(&self) -> Position {
        let Some(movement) = self.active.as_ref() else {
            return self.position;
        };
        let (extent_x, extent_y) = movement.capped_extent();
        Position::new(
            extent_x.map_or(self.position.x, |extent| self.anchor.x + extent),
            extent_y.map_or(self.position.y, |extent| self.anchor.y + extent),
        )
    }

    /// Stores `movement` as the pending movement if it stays within bounds.
    ///
    /// The check starts from [`Movable::resting_position`], where a pending
    /// movement is promoted. Returns `false` and leaves the entity untouched
    /// when the movement is illegal.
    pub(crate) fn queue_movement(&mut self, movement: Movement, geometry: &GridGeometry) -> bool {
        if !self.bounds.is_legal(self.resting_position(), &movement, geometry) {
            return false;
        }
        self.pending = Some(movement);
        true
    }

    /// Teleports the entity, dropping both the active and pending movement.
    pub(crate) fn place(&mut self, position: Position) {
        self.position = position;
        self.anchor = position;
        self.active = None;
        self.pending = None;
    }

    pub(crate) fn update(&mut self, dt: f32) {
        if self.active.is_none() {
            if let Some(next) = self.pending.take() {
                self.anchor = self.position;
                self.active = Some(next);
            }
        }

        let Some(movement) = self.active.as_mut() else {
            return;
        };

        let (dx, dy) = movement.advance(dt);
        if movement.is_finished() {
            // Capped axes land exactly on their target so floor-based cell
            // lookups never see the previous cell.
            let (travel_x, travel_y) = movement.capped_travel();
            if let Some(travel_x) = travel_x {
                self.position.x = self.anchor.x + travel_x;
            }
            if let Some(travel_y) = travel_y {
                self.position.y = self.anchor.y + travel_y;
            }
            self.active = None;
            return;
        }

        self.position = self.position.offset_by(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bug_crossing_core::{CellSpan, Direction, GridCell, Heading};

    fn field() -> (GridGeometry, Movable) {
        let geometry = GridGeometry::CLASSIC;
        let bounds =
            Bounds::from_cells(&geometry, CellSpan::new(0, 4), CellSpan::new(1, 5), 0.5)
                .expect("valid bounds");
        let start = geometry.cell_origin(GridCell::new(2, 5));
        (geometry, Movable::new(start, bounds))
    }

    fn step(geometry: &GridGeometry, direction: Direction) -> Movement {
        Movement::single_cell(direction, 4.0, geometry)
    }

    #[test]
    fn promotes_pending_movement_only_when_idle() {
        let (geometry, mut movable) = field();
        assert!(movable.queue_movement(step(&geometry, Direction::Left), &geometry));
        assert!(movable.has_pending());
        assert!(!movable.is_moving());

        movable.update(0.125);
        assert!(movable.is_moving());
        assert!(!movable.has_pending());
        assert_eq!(movable.position(), Position::new(151.5, 415.0));

        assert!(movable.queue_movement(step(&geometry, Direction::Up), &geometry));
        movable.update(0.125);
        assert_eq!(movable.position(), Position::new(101.0, 415.0));
        assert!(movable.has_pending(), "pending waits for the active movement");
    }

    #[test]
    fn admission_is_checked_from_the_end_of_the_active_step() {
        let (geometry, mut movable) = field();
        assert!(movable.queue_movement(step(&geometry, Direction::Right), &geometry));
        movable.update(0.0);
        assert!(movable.is_moving());
        assert_eq!(movable.resting_position(), Position::new(303.0, 415.0));

        assert!(movable.queue_movement(step(&geometry, Direction::Right), &geometry));
        movable.update(0.0);
        assert_eq!(movable.position(), Position::new(202.0, 415.0));
        assert!(movable.has_pending());
        while movable.is_moving() || movable.has_pending() {
            movable.update(0.125);
        }
        assert_eq!(movable.position(), Position::new(404.0, 415.0));

        assert!(movable.queue_movement(step(&geometry, Direction::Left), &geometry));
        movable.update(0.0);
        assert!(movable.queue_movement(step(&geometry, Direction::Right), &geometry));
        assert!(
            !movable.queue_movement(step(&geometry, Direction::Down), &geometry),
            "down from the bottom row stays illegal mid-step"
        );
    }

    #[test]
    fn completion_frame_clears_without_moving() {
        let (geometry, mut movable) = field();
        assert!(movable.queue_movement(step(&geometry, Direction::Up), &geometry));
        movable.update(0.25);
        assert_eq!(movable.position(), Position::new(202.0, 332.0));
        assert!(movable.is_moving());

        movable.update(0.25);
        assert_eq!(movable.position(), Position::new(202.0, 332.0));
        assert!(!movable.is_moving());
    }

    #[test]
    fn second_queue_replaces_first() {
        let (geometry, mut movable) = field();
        assert!(movable.queue_movement(step(&geometry, Direction::Left), &geometry));
        assert!(movable.queue_movement(step(&geometry, Direction::Right), &geometry));
        for _ in 0..4 {
            movable.update(0.125);
        }
        assert_eq!(geometry.cell_at(movable.position()), GridCell::new(3, 5));
        assert!(!movable.is_moving());
        assert!(!movable.has_pending());
    }

    #[test]
    fn illegal_movement_leaves_state_untouched() {
        let (geometry, mut movable) = field();
        assert!(movable.queue_movement(step(&geometry, Direction::Left), &geometry));
        assert!(!movable.queue_movement(step(&geometry, Direction::Down), &geometry));
        movable.update(0.25);
        assert_eq!(movable.position(), Position::new(101.0, 415.0));
    }

    #[test]
    fn settles_exactly_after_many_small_frames() {
        let (geometry, mut movable) = field();
        for _ in 0..2 {
            assert!(movable.queue_movement(
                Movement::single_cell(Direction::Right, 3.0, &geometry),
                &geometry
            ));
            while movable.has_pending() || movable.is_moving() {
                movable.update(1.0 / 60.0);
            }
        }
        assert_eq!(movable.position(), Position::new(404.0, 415.0));
        assert_eq!(geometry.cell_at(movable.position()), GridCell::new(4, 5));
    }

    #[test]
    fn place_cancels_active_and_pending() {
        let (geometry, mut movable) = field();
        assert!(movable.queue_movement(
            Movement::horizontal(Heading::Positive, 50.0, None),
            &geometry
        ));
        movable.update(0.5);
        assert!(movable.queue_movement(step(&geometry, Direction::Up), &geometry));
        movable.place(Position::new(0.0, 83.0));
        assert!(!movable.is_moving());
        assert!(!movable.has_pending());
        movable.update(1.0);
        assert_eq!(movable.position(), Position::new(0.0, 83.0));
    }
}
