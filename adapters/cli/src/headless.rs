//! Fixed-step backend that drives frames without a window.

use std::time::Duration;

use anyhow::{ensure, Result as AnyResult};
use bug_crossing_rendering::{FrameInput, Presentation, RenderingBackend, Scene, SpriteKey};

use crate::script::InputScript;

/// Backend that runs a fixed number of equally sized frames.
#[derive(Debug)]
pub(crate) struct HeadlessBackend {
    frames: u32,
    frame_delta: Duration,
    script: InputScript,
}

impl HeadlessBackend {
    pub(crate) fn new(frames: u32, fps: u32, script: InputScript) -> AnyResult<Self> {
        ensure!(fps > 0, "fps must be positive");
        Ok(Self {
            frames,
            frame_delta: Duration::from_secs(1) / fps,
            script,
        })
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene),
    {
        log::info!(
            "{}: {} frames on a {}x{} canvas",
            presentation.window_title,
            self.frames,
            presentation.canvas.x,
            presentation.canvas.y
        );

        let mut scene = presentation.scene;
        let mut draw_calls = 0_u64;
        for frame in 0..self.frames {
            update_scene(self.frame_delta, self.script.input_for(frame), &mut scene);
            scene.draw(&mut |sprite: SpriteKey, x: f32, y: f32| {
                draw_calls += 1;
                log::trace!("frame {frame}: draw {} at ({x}, {y})", sprite.asset_path());
            });
        }

        log::info!("issued {draw_calls} draw calls");
        Ok(())
    }
}
