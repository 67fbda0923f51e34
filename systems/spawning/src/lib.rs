#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system that picks a lane and speed for every parked enemy.

use bug_crossing_core::{CellSpan, Command, Event, FieldLayout, SpeedRange};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the lane and speed handed to a respawning enemy.
///
/// Implementations must return values inside the provided span and range.
pub trait SpawnSource {
    /// Picks a lane uniformly from `lanes`, inclusive on both ends.
    fn pick_row(&mut self, lanes: CellSpan) -> i32;

    /// Picks a speed in cells per second uniformly from `range`.
    fn pick_speed(&mut self, range: SpeedRange) -> f32;
}

/// Spawn source backed by any random number generator.
#[derive(Clone, Debug)]
pub struct RandomSpawns<R> {
    rng: R,
}

impl<R: Rng> RandomSpawns<R> {
    /// Wraps the provided generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSpawns<ChaCha8Rng> {
    /// Creates a reproducible source seeded from `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SpawnSource for RandomSpawns<R> {
    fn pick_row(&mut self, lanes: CellSpan) -> i32 {
        if lanes.first >= lanes.last {
            return lanes.first;
        }
        self.rng.gen_range(lanes.first..=lanes.last)
    }

    fn pick_speed(&mut self, range: SpeedRange) -> f32 {
        if range.min >= range.max {
            return range.min;
        }
        self.rng.gen_range(range.min..=range.max)
    }
}

/// Pure system translating spawn requests into respawn commands.
#[derive(Debug)]
pub struct Spawning<S> {
    source: S,
}

impl<S: SpawnSource> Spawning<S> {
    /// Creates a new spawning system drawing lanes and speeds from `source`.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Consumes events and the active layout to emit respawn commands.
    ///
    /// Requests are answered in the order they were raised.
    pub fn handle(&mut self, events: &[Event], layout: &FieldLayout, out: &mut Vec<Command>) {
        for event in events {
            let Event::SpawnRequested { enemy } = event else {
                continue;
            };

            let row = self.source.pick_row(layout.enemy_lanes);
            let cells_per_second = self.source.pick_speed(layout.enemy_speed);
            let speed = layout.geometry.cols_to_px(cells_per_second);
            log::trace!(
                "enemy {} respawns in row {row} at {cells_per_second:.2} cells/s",
                enemy.get()
            );
            out.push(Command::RespawnEnemy {
                enemy: *enemy,
                row,
                speed,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_agree() {
        let lanes = CellSpan::new(1, 3);
        let range = SpeedRange { min: 1.0, max: 3.0 };
        let mut first = RandomSpawns::from_seed(0x5eed);
        let mut second = RandomSpawns::from_seed(0x5eed);
        for _ in 0..32 {
            let row = first.pick_row(lanes);
            let speed = first.pick_speed(range);
            assert!(lanes.contains(row));
            assert!(range.contains(speed));
            assert_eq!(row, second.pick_row(lanes));
            assert_eq!(speed, second.pick_speed(range));
        }
    }

    #[test]
    fn degenerate_ranges_return_their_lower_end() {
        let mut source = RandomSpawns::from_seed(7);
        assert_eq!(source.pick_row(CellSpan::new(4, 4)), 4);
        assert_eq!(source.pick_speed(SpeedRange { min: 2.0, max: 2.0 }), 2.0);
    }
}
