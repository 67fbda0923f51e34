//! Session configuration loaded from TOML and overridden by flags.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use bug_crossing_core::FieldLayout;
use serde::Deserialize;

const DEFAULT_SEED: u64 = 0x6275_6773;
const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_FPS: u32 = 60;

/// Everything a headless session needs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    /// Seed for the enemy lane and speed picks.
    pub(crate) seed: u64,
    /// Number of frames to simulate.
    pub(crate) frames: u32,
    /// Simulated frames per second.
    pub(crate) fps: u32,
    /// Scripted `frame:direction` inputs.
    pub(crate) inputs: Vec<String>,
    /// Playfield layout.
    pub(crate) layout: FieldLayout,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            frames: DEFAULT_FRAMES,
            fps: DEFAULT_FPS,
            inputs: Vec::new(),
            layout: FieldLayout::default(),
        }
    }
}

impl SessionConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid config file at {}", path.display()))
    }

    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse session toml contents")?;
        config.check()?;
        Ok(config)
    }

    /// Rejects settings that would stall the session.
    pub(crate) fn check(&self) -> Result<()> {
        ensure!(self.fps > 0, "fps must be positive");
        self.layout
            .validate()
            .context("layout table failed validation")?;
        Ok(())
    }
}
