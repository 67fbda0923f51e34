#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a headless Bug Crossing session.

mod config;
mod headless;
mod script;

use std::{fmt, path::PathBuf};

use anyhow::{Context, Result};
use bug_crossing_core::{Event, RespawnCause};
use bug_crossing_rendering::{Presentation, RenderingBackend};
use bug_crossing_system_frame::FrameDriver;
use bug_crossing_system_spawning::RandomSpawns;
use bug_crossing_world::query;
use clap::Parser;
use glam::Vec2;

use crate::{config::SessionConfig, headless::HeadlessBackend, script::InputScript};

const WINDOW_TITLE: &str = "Bug Crossing";
const CANVAS: Vec2 = Vec2::new(505.0, 606.0);

/// Runs a deterministic, windowless Bug Crossing session.
#[derive(Debug, Parser)]
#[command(name = "bug-crossing", version)]
struct Args {
    /// TOML file with `seed`, `frames`, `fps`, `inputs`, and a `[layout]` table.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for enemy lanes and speeds.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of frames to simulate.
    #[arg(long)]
    frames: Option<u32>,
    /// Simulated frames per second.
    #[arg(long)]
    fps: Option<u32>,
    /// Scripted input such as `12:up` or `12:38`; replaces the file's inputs.
    #[arg(long = "input", value_name = "FRAME:DIRECTION")]
    inputs: Vec<String>,
}

impl Args {
    fn session(self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if !self.inputs.is_empty() {
            config.inputs = self.inputs;
        }
        config.check()?;
        Ok(config)
    }
}

/// Tally of notable events over a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Summary {
    frames: u64,
    moves: u64,
    rejected_moves: u64,
    collisions: u64,
    goals: u64,
    escapes: u64,
}

impl Summary {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::TimeAdvanced { .. } => self.frames += 1,
                Event::PlayerMoveQueued { .. } => self.moves += 1,
                Event::PlayerMoveRejected { .. } => self.rejected_moves += 1,
                Event::PlayerCollided { enemy } => {
                    self.collisions += 1;
                    log::info!("player hit enemy {}", enemy.get());
                }
                Event::PlayerRespawned {
                    cause: RespawnCause::Goal,
                    ..
                } => {
                    self.goals += 1;
                    log::info!("goal reached");
                }
                Event::EnemyEscaped { .. } => self.escapes += 1,
                _ => {}
            }
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frames: {}, moves: {} ({} rejected), collisions: {}, goals: {}, enemy escapes: {}",
            self.frames, self.moves, self.rejected_moves, self.collisions, self.goals, self.escapes
        )
    }
}

/// Entry point for the Bug Crossing command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().session()?;
    let script = InputScript::parse(&config.inputs).context("failed to parse scripted inputs")?;
    log::info!("seed {:#x}, {} scripted inputs", config.seed, script.len());

    let mut driver = FrameDriver::new(config.layout, RandomSpawns::from_seed(config.seed))
        .context("failed to configure the field")?;
    println!("{}", query::welcome_banner(driver.world()));

    let backend = HeadlessBackend::new(config.frames, config.fps, script)?;
    let presentation = Presentation::new(WINDOW_TITLE, CANVAS, driver.scene());
    let mut summary = Summary::default();
    backend.run(presentation, |dt, input, scene| {
        if let Some(direction) = input.direction {
            summary.record(&driver.on_input(direction));
        }
        summary.record(&driver.on_frame(dt));
        scene.replace(driver.scene());
    })?;

    println!("{summary}");
    Ok(())
}
