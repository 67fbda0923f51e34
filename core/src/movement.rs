//! Directional, speed- and distance-bounded translations consumed across frames.

use serde::{Deserialize, Serialize};

use crate::{Direction, GridGeometry};

/// Sign of travel along a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Travel toward decreasing coordinates.
    Negative,
    /// Travel toward increasing coordinates.
    Positive,
}

impl Heading {
    /// Multiplier applied to unsigned distances travelled along the axis.
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Negative => -1.0,
            Self::Positive => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct AxisMotion {
    heading: Heading,
    speed: f32,
    distance: Option<f32>,
    remaining: Option<f32>,
}

impl AxisMotion {
    const INERT: Self = Self {
        heading: Heading::Positive,
        speed: 0.0,
        distance: None,
        remaining: None,
    };

    fn new(heading: Heading, speed: f32, distance: Option<f32>) -> Self {
        let distance = distance.map(non_negative);
        Self {
            heading,
            speed: non_negative(speed),
            distance,
            remaining: distance,
        }
    }

    fn advance(&mut self, dt: f32) -> f32 {
        if self.remaining.is_some_and(|remaining| remaining <= 0.0) {
            self.speed = 0.0;
            return 0.0;
        }
        if self.speed <= 0.0 {
            return 0.0;
        }

        let step = self.speed * non_negative(dt);
        let travelled = match self.remaining {
            Some(remaining) => step.min(remaining),
            None => step,
        };
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = (*remaining - travelled).max(0.0);
        }
        self.heading.factor() * travelled
    }

    fn reach(&self, fallback: f32) -> f32 {
        if self.speed <= 0.0 {
            return 0.0;
        }
        self.heading.factor() * self.remaining.unwrap_or(fallback)
    }

    fn capped_extent(&self) -> Option<f32> {
        self.distance.map(|distance| self.heading.factor() * distance)
    }

    fn capped_travel(&self) -> Option<f32> {
        match (self.distance, self.remaining) {
            (Some(distance), Some(remaining)) => {
                Some(self.heading.factor() * (distance - remaining))
            }
            _ => None,
        }
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// One in-flight translation: heading, speed and optional distance cap per axis.
///
/// Speeds are pixels per second. An axis whose remaining distance reaches
/// zero has its speed forced to zero on the next [`Movement::advance`]; the
/// movement is finished once both axis speeds are zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movement {
    horizontal: AxisMotion,
    vertical: AxisMotion,
}

impl Movement {
    /// Movement along the horizontal axis only.
    #[must_use]
    pub fn horizontal(heading: Heading, speed: f32, distance: Option<f32>) -> Self {
        Self {
            horizontal: AxisMotion::new(heading, speed, distance),
            vertical: AxisMotion::INERT,
        }
    }

    /// Movement along the vertical axis only.
    #[must_use]
    pub fn vertical(heading: Heading, speed: f32, distance: Option<f32>) -> Self {
        Self {
            horizontal: AxisMotion::INERT,
            vertical: AxisMotion::new(heading, speed, distance),
        }
    }

    /// Replaces the vertical component, producing a diagonal movement.
    #[must_use]
    pub fn with_vertical(mut self, heading: Heading, speed: f32, distance: Option<f32>) -> Self {
        self.vertical = AxisMotion::new(heading, speed, distance);
        self
    }

    /// Exactly one grid cell in a cardinal direction.
    ///
    /// `cells_per_second` is converted per axis, so a horizontal and a
    /// vertical step take the same amount of time.
    #[must_use]
    pub fn single_cell(
        direction: Direction,
        cells_per_second: f32,
        geometry: &GridGeometry,
    ) -> Self {
        let width = Some(geometry.cell_width());
        let height = Some(geometry.cell_height());
        let across = geometry.cols_to_px(cells_per_second);
        let along = geometry.rows_to_px(cells_per_second);
        match direction {
            Direction::Left => Self::horizontal(Heading::Negative, across, width),
            Direction::Right => Self::horizontal(Heading::Positive, across, width),
            Direction::Up => Self::vertical(Heading::Negative, along, height),
            Direction::Down => Self::vertical(Heading::Positive, along, height),
        }
    }

    /// Consumes `dt` seconds of travel, returning the signed `(dx, dy)` deltas.
    pub fn advance(&mut self, dt: f32) -> (f32, f32) {
        let dx = self.horizontal.advance(dt);
        let dy = self.vertical.advance(dt);
        (dx, dy)
    }

    /// Reports whether both axes have come to rest.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.horizontal.speed <= 0.0 && self.vertical.speed <= 0.0
    }

    /// Current `(horizontal, vertical)` speeds in pixels per second.
    #[must_use]
    pub fn speed(&self) -> (f32, f32) {
        (self.horizontal.speed, self.vertical.speed)
    }

    /// Remaining distance cap per axis; `None` means unbounded.
    #[must_use]
    pub fn remaining(&self) -> (Option<f32>, Option<f32>) {
        (self.horizontal.remaining, self.vertical.remaining)
    }

    /// Signed maximum travel per axis still ahead of the movement.
    ///
    /// Axes without a distance cap fall back to one full cell. Axes at rest
    /// contribute nothing.
    #[must_use]
    pub fn reach(&self, geometry: &GridGeometry) -> (f32, f32) {
        (
            self.horizontal.reach(geometry.cell_width()),
            self.vertical.reach(geometry.cell_height()),
        )
    }

    /// Signed full distance of each capped axis, independent of progress.
    #[must_use]
    pub fn capped_extent(&self) -> (Option<f32>, Option<f32>) {
        (self.horizontal.capped_extent(), self.vertical.capped_extent())
    }

    /// Signed distance covered so far by each capped axis.
    ///
    /// Computed from the cap rather than by summing deltas, so an axis that
    /// ran to completion reports its distance exactly.
    #[must_use]
    pub fn capped_travel(&self) -> (Option<f32>, Option<f32>) {
        (self.horizontal.capped_travel(), self.vertical.capped_travel())
    }
}
