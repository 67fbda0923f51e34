//! Playfield configuration shared by the world, systems and adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Bounds, BoundsError, CellSpan, GridCell, GridGeometry, Position};

/// Uniform range of speeds measured in cells per second.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    /// Slowest speed that may be drawn.
    pub min: f32,
    /// Fastest speed that may be drawn.
    pub max: f32,
}

impl SpeedRange {
    /// Creates a new speed range.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Reports whether `speed` lies within the range, edges included.
    #[must_use]
    pub fn contains(&self, speed: f32) -> bool {
        speed >= self.min && speed <= self.max
    }
}

/// Reasons a [`FieldLayout`] is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum LayoutError {
    /// Cell dimensions must be finite and positive.
    #[error("cell size {cell_width}x{cell_height} must be positive")]
    InvalidGeometry {
        /// Configured column width.
        cell_width: f32,
        /// Configured row height.
        cell_height: f32,
    },
    /// A span listed its last index before its first.
    #[error("{name} span {first}..={last} is inverted")]
    InvertedSpan {
        /// Name of the offending field.
        name: &'static str,
        /// Configured first index.
        first: i32,
        /// Configured last index.
        last: i32,
    },
    /// The player start cell lies outside the player spans.
    #[error("player start ({column}, {row}) lies outside the playable field")]
    StartOutsideField {
        /// Configured start column.
        column: i32,
        /// Configured start row.
        row: i32,
    },
    /// Enemy speed range is inverted or not strictly positive.
    #[error("enemy speed range {min}..{max} must be ordered and positive")]
    InvalidSpeedRange {
        /// Configured minimum speed.
        min: f32,
        /// Configured maximum speed.
        max: f32,
    },
    /// Player step speed must be positive.
    #[error("player speed {0} must be positive")]
    InvalidPlayerSpeed(f32),
    /// Frame delta clamp must be positive.
    #[error("max frame delta {0}s must be positive")]
    InvalidFrameClamp(f32),
    /// Derived bounds were degenerate.
    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// Complete description of the playfield and its entities.
///
/// Defaults reproduce the classic five-column board: enemies cruise along
/// rows 1 to 3 from one column left of the field to one column right of it,
/// and the player starts at (2, 5) aiming for row 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLayout {
    /// Cell dimensions and render offset.
    pub geometry: GridGeometry,
    /// Columns the player may occupy.
    pub player_columns: CellSpan,
    /// Rows the player may occupy; the row above `first` is the goal.
    pub player_rows: CellSpan,
    /// Cell the player spawns in.
    pub player_start: GridCell,
    /// Speed of a single queued grid step, in cells per second.
    pub player_speed: f32,
    /// Number of enemies roaming the field.
    pub enemy_count: u32,
    /// Columns enemies travel between; `first` is the spawn column.
    pub enemy_columns: CellSpan,
    /// Rows an enemy may spawn in.
    pub enemy_lanes: CellSpan,
    /// Range enemy speeds are drawn from, in cells per second.
    pub enemy_speed: SpeedRange,
    /// Padding in pixels added to every side of derived bounds.
    pub bounds_padding: f32,
    /// Largest frame delta in seconds the driver forwards to the world.
    pub max_frame_seconds: f32,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            geometry: GridGeometry::CLASSIC,
            player_columns: CellSpan::new(0, 4),
            player_rows: CellSpan::new(1, 5),
            player_start: GridCell::new(2, 5),
            player_speed: 8.0,
            enemy_count: 3,
            enemy_columns: CellSpan::new(-1, 5),
            enemy_lanes: CellSpan::new(1, 3),
            enemy_speed: SpeedRange::new(1.0, 3.0),
            bounds_padding: 0.5,
            max_frame_seconds: 0.1,
        }
    }
}

impl FieldLayout {
    /// Checks every invariant the world relies on.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let width = self.geometry.cell_width();
        let height = self.geometry.cell_height();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(LayoutError::InvalidGeometry {
                cell_width: width,
                cell_height: height,
            });
        }

        for (name, span) in [
            ("player_columns", self.player_columns),
            ("player_rows", self.player_rows),
            ("enemy_columns", self.enemy_columns),
            ("enemy_lanes", self.enemy_lanes),
        ] {
            if !span.is_ordered() {
                return Err(LayoutError::InvertedSpan {
                    name,
                    first: span.first,
                    last: span.last,
                });
            }
        }

        let start = self.player_start;
        let start_inside =
            self.player_columns.contains(start.column()) && self.player_rows.contains(start.row());
        if !start_inside {
            return Err(LayoutError::StartOutsideField {
                column: start.column(),
                row: start.row(),
            });
        }

        let speed = self.enemy_speed;
        let speed_ordered = speed.min > 0.0 && speed.min <= speed.max;
        if !(speed.min.is_finite() && speed.max.is_finite() && speed_ordered) {
            return Err(LayoutError::InvalidSpeedRange {
                min: speed.min,
                max: speed.max,
            });
        }
        if !(self.player_speed.is_finite() && self.player_speed > 0.0) {
            return Err(LayoutError::InvalidPlayerSpeed(self.player_speed));
        }
        if !(self.max_frame_seconds.is_finite() && self.max_frame_seconds > 0.0) {
            return Err(LayoutError::InvalidFrameClamp(self.max_frame_seconds));
        }

        let _ = self.player_bounds()?;
        let _ = self.enemy_bounds()?;
        Ok(())
    }

    /// Bounds equal to the playable grid.
    pub fn player_bounds(&self) -> Result<Bounds, LayoutError> {
        Ok(Bounds::from_cells(
            &self.geometry,
            self.player_columns,
            self.player_rows,
            self.bounds_padding,
        )?)
    }

    /// Bounds spanning the enemy columns across every enemy lane.
    pub fn enemy_bounds(&self) -> Result<Bounds, LayoutError> {
        Ok(Bounds::from_cells(
            &self.geometry,
            self.enemy_columns,
            self.enemy_lanes,
            self.bounds_padding,
        )?)
    }

    /// Logical pixel origin of the player start cell.
    #[must_use]
    pub fn player_start_position(&self) -> Position {
        self.geometry.cell_origin(self.player_start)
    }

    /// Column enemies appear in when they respawn.
    #[must_use]
    pub const fn enemy_spawn_column(&self) -> i32 {
        self.enemy_columns.first
    }
}
