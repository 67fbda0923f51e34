//! Axis-aligned admissible regions for entity positions.

use thiserror::Error;

use crate::{CellSpan, GridGeometry, Movement, Position};

/// Reasons a [`Bounds`] rectangle cannot be constructed.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum BoundsError {
    /// One of the extents was NaN or infinite.
    #[error("bounds extents must be finite")]
    NonFinite,
    /// The horizontal extents are empty or inverted.
    #[error("bounds min_x ({min_x}) must be smaller than max_x ({max_x})")]
    EmptyHorizontal {
        /// Requested lower horizontal extent.
        min_x: f32,
        /// Requested upper horizontal extent.
        max_x: f32,
    },
    /// The vertical extents are empty or inverted.
    #[error("bounds min_y ({min_y}) must be smaller than max_y ({max_y})")]
    EmptyVertical {
        /// Requested lower vertical extent.
        min_y: f32,
        /// Requested upper vertical extent.
        max_y: f32,
    },
}

/// Inclusive pixel rectangle an entity's position may not leave.
///
/// Construct it either from raw pixel extents ([`Bounds::from_pixels`]) or
/// from grid spans ([`Bounds::from_cells`]); the latter maps each span onto
/// the pixel origins of its first and last cell and never includes the
/// render offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from raw pixel extents.
    pub fn from_pixels(
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    ) -> Result<Self, BoundsError> {
        if ![min_x, min_y, max_x, max_y].iter().all(|value| value.is_finite()) {
            return Err(BoundsError::NonFinite);
        }
        if min_x >= max_x {
            return Err(BoundsError::EmptyHorizontal { min_x, max_x });
        }
        if min_y >= max_y {
            return Err(BoundsError::EmptyVertical { min_y, max_y });
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Creates bounds from inclusive column and row spans, padded on every side.
    ///
    /// A span covering a single cell is valid as long as `padding` is positive.
    pub fn from_cells(
        geometry: &GridGeometry,
        columns: CellSpan,
        rows: CellSpan,
        padding: f32,
    ) -> Result<Self, BoundsError> {
        let padding = padding.max(0.0);
        Self::from_pixels(
            geometry.cols_to_px(columns.first as f32) - padding,
            geometry.rows_to_px(rows.first as f32) - padding,
            geometry.cols_to_px(columns.last as f32) + padding,
            geometry.rows_to_px(rows.last as f32) + padding,
        )
    }

    /// Lower horizontal extent.
    #[must_use]
    pub const fn min_x(&self) -> f32 {
        self.min_x
    }

    /// Lower vertical extent.
    #[must_use]
    pub const fn min_y(&self) -> f32 {
        self.min_y
    }

    /// Upper horizontal extent.
    #[must_use]
    pub const fn max_x(&self) -> f32 {
        self.max_x
    }

    /// Upper vertical extent.
    #[must_use]
    pub const fn max_y(&self) -> f32 {
        self.max_y
    }

    /// Columns whose cell origin lies inside the rectangle.
    #[must_use]
    pub fn cell_columns(&self, geometry: &GridGeometry) -> CellSpan {
        CellSpan::new(
            (self.min_x / geometry.cell_width()).ceil() as i32,
            geometry.px_to_cols(self.max_x),
        )
    }

    /// Rows whose cell origin lies inside the rectangle.
    #[must_use]
    pub fn cell_rows(&self, geometry: &GridGeometry) -> CellSpan {
        CellSpan::new(
            (self.min_y / geometry.cell_height()).ceil() as i32,
            geometry.px_to_rows(self.max_y),
        )
    }

    /// Reports whether the position lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }

    /// Conservative admission check for a movement starting at `position`.
    ///
    /// Rejects the movement when its full reach on either axis would leave
    /// the rectangle. Axes without a distance cap are assumed to travel one
    /// cell.
    #[must_use]
    pub fn is_legal(
        &self,
        position: Position,
        movement: &Movement,
        geometry: &GridGeometry,
    ) -> bool {
        let (reach_x, reach_y) = movement.reach(geometry);
        let x = position.x + reach_x;
        let y = position.y + reach_y;
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Heading};

    fn player_bounds() -> Bounds {
        Bounds::from_cells(
            &GridGeometry::CLASSIC,
            CellSpan::new(0, 4),
            CellSpan::new(1, 5),
            0.5,
        )
        .expect("valid bounds")
    }

    #[test]
    fn from_cells_maps_spans_onto_cell_origins() {
        let bounds = player_bounds();
        assert_eq!(bounds.min_x(), -0.5);
        assert_eq!(bounds.max_x(), 404.5);
        assert_eq!(bounds.min_y(), 82.5);
        assert_eq!(bounds.max_y(), 415.5);
        assert_eq!(bounds.cell_columns(&GridGeometry::CLASSIC), CellSpan::new(0, 4));
        assert_eq!(bounds.cell_rows(&GridGeometry::CLASSIC), CellSpan::new(1, 5));
    }

    #[test]
    fn rejects_inverted_or_empty_extents() {
        assert_eq!(
            Bounds::from_pixels(10.0, 0.0, 10.0, 5.0),
            Err(BoundsError::EmptyHorizontal {
                min_x: 10.0,
                max_x: 10.0
            })
        );
        assert_eq!(
            Bounds::from_pixels(0.0, 5.0, 10.0, 1.0),
            Err(BoundsError::EmptyVertical {
                min_y: 5.0,
                max_y: 1.0
            })
        );
        assert_eq!(
            Bounds::from_pixels(0.0, 0.0, f32::INFINITY, 1.0),
            Err(BoundsError::NonFinite)
        );
        assert!(Bounds::from_cells(
            &GridGeometry::CLASSIC,
            CellSpan::new(2, 2),
            CellSpan::new(5, 5),
            0.0
        )
        .is_err());
        assert!(Bounds::from_cells(
            &GridGeometry::CLASSIC,
            CellSpan::new(2, 2),
            CellSpan::new(5, 5),
            0.5
        )
        .is_ok());
    }

    #[test]
    fn accepts_single_cell_steps_inside_the_field() {
        let geometry = GridGeometry::CLASSIC;
        let bounds = player_bounds();
        let start = geometry.cell_origin(crate::GridCell::new(2, 5));
        for direction in [Direction::Left, Direction::Right, Direction::Up] {
            let step = Movement::single_cell(direction, 8.0, &geometry);
            assert!(bounds.is_legal(start, &step, &geometry), "{direction:?}");
        }
    }

    #[test]
    fn rejects_steps_that_cross_any_edge() {
        let geometry = GridGeometry::CLASSIC;
        let bounds = player_bounds();
        let bottom_right = geometry.cell_origin(crate::GridCell::new(4, 5));
        let top_left = geometry.cell_origin(crate::GridCell::new(0, 1));

        let right = Movement::single_cell(Direction::Right, 8.0, &geometry);
        let down = Movement::single_cell(Direction::Down, 8.0, &geometry);
        let left = Movement::single_cell(Direction::Left, 8.0, &geometry);
        let up = Movement::single_cell(Direction::Up, 8.0, &geometry);

        assert!(!bounds.is_legal(bottom_right, &right, &geometry));
        assert!(!bounds.is_legal(bottom_right, &down, &geometry));
        assert!(!bounds.is_legal(top_left, &left, &geometry));
        assert!(!bounds.is_legal(top_left, &up, &geometry));
    }

    #[test]
    fn uncapped_axes_are_checked_one_cell_ahead() {
        let geometry = GridGeometry::CLASSIC;
        let bounds = Bounds::from_pixels(-101.0, 0.0, 505.0, 300.0).expect("valid bounds");
        let cruise = Movement::horizontal(Heading::Positive, 150.0, None);
        assert!(bounds.is_legal(Position::new(404.0, 83.0), &cruise, &geometry));
        assert!(!bounds.is_legal(Position::new(404.5, 83.0), &cruise, &geometry));
    }

    #[test]
    fn contains_includes_edges() {
        let bounds = player_bounds();
        assert!(bounds.contains(Position::new(-0.5, 82.5)));
        assert!(bounds.contains(Position::new(404.5, 415.5)));
        assert!(!bounds.contains(Position::new(405.0, 200.0)));
    }
}
