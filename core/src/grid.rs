//! Conversions between grid units and logical pixel coordinates.

use serde::{Deserialize, Serialize};

/// Pair of real-valued pixel coordinates in logical (offset-free) space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal pixel coordinate, growing to the right.
    pub x: f32,
    /// Vertical pixel coordinate, growing downwards.
    pub y: f32,
}

impl Position {
    /// Creates a new position from raw pixel coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the position translated by the provided deltas.
    #[must_use]
    pub fn offset_by(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Integer column and row indices of a single grid cell.
///
/// Columns may be negative: enemies spawn one column left of the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    column: i32,
    row: i32,
}

impl GridCell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }
}

/// Inclusive span of grid indices along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSpan {
    /// Lowest index contained in the span.
    pub first: i32,
    /// Highest index contained in the span.
    pub last: i32,
}

impl CellSpan {
    /// Creates a new inclusive span.
    #[must_use]
    pub const fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    /// Reports whether the index lies within the span.
    #[must_use]
    pub const fn contains(&self, index: i32) -> bool {
        index >= self.first && index <= self.last
    }

    /// Reports whether `first <= last`.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.first <= self.last
    }
}

/// Fixed cell dimensions plus the vertical offset applied to sprite artwork.
///
/// Positions handed to the geometry are logical: a cell origin is exactly
/// `(cols_to_px(column), rows_to_px(row))`. The row offset only enters the
/// picture through [`GridGeometry::render_origin`], so bounds checks and
/// cell lookups never see it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    cell_width: f32,
    cell_height: f32,
    row_offset: f32,
}

impl GridGeometry {
    /// Geometry of the classic playfield artwork.
    pub const CLASSIC: Self = Self::new(101.0, 83.0, -35.0);

    /// Creates a geometry from explicit cell dimensions and render offset.
    #[must_use]
    pub const fn new(cell_width: f32, cell_height: f32, row_offset: f32) -> Self {
        Self {
            cell_width,
            cell_height,
            row_offset,
        }
    }

    /// Width of a single column in pixels.
    #[must_use]
    pub const fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of a single row in pixels.
    #[must_use]
    pub const fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Vertical offset added to draw coordinates.
    #[must_use]
    pub const fn row_offset(&self) -> f32 {
        self.row_offset
    }

    /// Converts a (possibly fractional) column count into pixels.
    #[must_use]
    pub fn cols_to_px(&self, cols: f32) -> f32 {
        self.cell_width * cols
    }

    /// Converts a (possibly fractional) row count into pixels.
    #[must_use]
    pub fn rows_to_px(&self, rows: f32) -> f32 {
        self.cell_height * rows
    }

    /// Column containing the horizontal pixel coordinate.
    #[must_use]
    pub fn px_to_cols(&self, px: f32) -> i32 {
        (px / self.cell_width).floor() as i32
    }

    /// Row containing the vertical pixel coordinate.
    #[must_use]
    pub fn px_to_rows(&self, px: f32) -> i32 {
        (px / self.cell_height).floor() as i32
    }

    /// Logical pixel origin of the provided cell.
    #[must_use]
    pub fn cell_origin(&self, cell: GridCell) -> Position {
        Position::new(
            self.cols_to_px(cell.column() as f32),
            self.rows_to_px(cell.row() as f32),
        )
    }

    /// Cell containing the provided logical position.
    #[must_use]
    pub fn cell_at(&self, position: Position) -> GridCell {
        GridCell::new(self.px_to_cols(position.x), self.px_to_rows(position.y))
    }

    /// Draw coordinates for a sprite resting at the logical position.
    #[must_use]
    pub fn render_origin(&self, position: Position) -> (f32, f32) {
        (position.x, position.y + self.row_offset)
    }

    /// Proximity rule shared by every collision check.
    ///
    /// Two positions collide when they are closer than half a cell on both
    /// axes. Movement state plays no part in the comparison.
    #[must_use]
    pub fn has_collided(&self, first: Position, second: Position) -> bool {
        let x_collided = (first.x - second.x).abs() < self.cell_width / 2.0;
        let y_collided = (first.y - second.y).abs() < self.cell_height / 2.0;
        x_collided && y_collided
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::CLASSIC
    }
}
