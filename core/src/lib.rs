#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Bug Crossing engine.
//!
//! This crate defines the motion micro-engine (grid conversion, bounds and
//! movements) together with the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically.

mod bounds;
mod grid;
mod layout;
mod movement;

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bounds::{Bounds, BoundsError};
pub use grid::{CellSpan, GridCell, GridGeometry, Position};
pub use layout::{FieldLayout, LayoutError, SpeedRange};
pub use movement::{Heading, Movement};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Bug Crossing.";

/// Cardinal directions a player may step in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
    /// Toward decreasing row indices, in the direction of the goal.
    Up,
    /// Toward increasing row indices.
    Down,
}

impl Direction {
    /// All directions in input-symbol order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Lowercase input symbol for the direction.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Raised when an input symbol is not one of the four directions.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown direction `{0}`")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|direction| direction.symbol().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDirection(trimmed.to_owned()))
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Reason the player was returned to the start cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RespawnCause {
    /// The field was (re)configured.
    Configured,
    /// The player came within collision range of an enemy.
    Collision,
    /// The player stepped up from the topmost playable row.
    Goal,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the playfield layout, resetting every entity.
    ConfigureField {
        /// Layout to validate and install.
        layout: FieldLayout,
    },
    /// Advances the simulation by one frame.
    Tick {
        /// Time elapsed since the previous frame.
        dt: Duration,
    },
    /// Requests a single grid step of the player.
    MovePlayer {
        /// Direction of the requested step.
        direction: Direction,
    },
    /// Reinitialises an enemy at the spawn column with a fresh lane and speed.
    RespawnEnemy {
        /// Enemy to respawn.
        enemy: EnemyId,
        /// Lane the enemy cruises along.
        row: i32,
        /// Horizontal speed in pixels per second.
        speed: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// An enemy is parked and waits for a [`Command::RespawnEnemy`].
    SpawnRequested {
        /// Enemy awaiting a lane and speed.
        enemy: EnemyId,
    },
    /// An enemy was placed at the spawn column.
    EnemySpawned {
        /// Enemy that respawned.
        enemy: EnemyId,
        /// Cell the enemy starts from.
        cell: GridCell,
        /// Horizontal speed in pixels per second.
        speed: f32,
    },
    /// An enemy moved past the right edge of its bounds.
    EnemyEscaped {
        /// Enemy that left the field.
        enemy: EnemyId,
    },
    /// A player step passed the bounds check and is pending.
    PlayerMoveQueued {
        /// Direction of the accepted step.
        direction: Direction,
    },
    /// A player step would have left the playable grid.
    PlayerMoveRejected {
        /// Direction of the discarded step.
        direction: Direction,
    },
    /// The player came within collision range of an enemy.
    PlayerCollided {
        /// Enemy the player ran into.
        enemy: EnemyId,
    },
    /// The player was reset to the start cell.
    PlayerRespawned {
        /// Why the reset happened.
        cause: RespawnCause,
        /// Start cell the player now occupies.
        cell: GridCell,
    },
    /// A [`Command::ConfigureField`] carried an invalid layout.
    ConfigurationRejected {
        /// Specific reason the layout failed validation.
        reason: LayoutError,
    },
}
