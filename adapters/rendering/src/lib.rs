#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Bug Crossing adapters.

use anyhow::Result as AnyResult;
use bug_crossing_core::Direction;
use glam::Vec2;
use std::time::Duration;

/// Key code reported for the left arrow key.
pub const KEY_LEFT: u32 = 37;
/// Key code reported for the up arrow key.
pub const KEY_UP: u32 = 38;
/// Key code reported for the right arrow key.
pub const KEY_RIGHT: u32 = 39;
/// Key code reported for the down arrow key.
pub const KEY_DOWN: u32 = 40;

/// Maps an arrow key code onto a movement direction.
///
/// Every other code is ignored.
#[must_use]
pub const fn direction_from_key_code(code: u32) -> Option<Direction> {
    match code {
        KEY_LEFT => Some(Direction::Left),
        KEY_UP => Some(Direction::Up),
        KEY_RIGHT => Some(Direction::Right),
        KEY_DOWN => Some(Direction::Down),
        _ => None,
    }
}

/// Named image an adapter must be able to paint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Sprite drawn for every enemy.
    Enemy,
    /// Sprite drawn for the player.
    Player,
}

impl SpriteKey {
    /// Relative path of the image backing the sprite.
    #[must_use]
    pub const fn asset_path(self) -> &'static str {
        match self {
            Self::Enemy => "images/enemy-bug.png",
            Self::Player => "images/char-boy.png",
        }
    }
}

/// Single sprite positioned at its draw coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    /// Image to paint.
    pub sprite: SpriteKey,
    /// Top-left draw coordinate in canvas pixels.
    pub origin: Vec2,
}

impl SpriteInstance {
    /// Creates a new sprite instance drawn at `(x, y)`.
    #[must_use]
    pub fn new(sprite: SpriteKey, x: f32, y: f32) -> Self {
        Self {
            sprite,
            origin: Vec2::new(x, y),
        }
    }
}

/// Draw primitive supplied by the rendering backend.
pub trait DrawTarget {
    /// Paints `sprite` with its top-left corner at `(x, y)`.
    fn draw_sprite(&mut self, sprite: SpriteKey, x: f32, y: f32);
}

impl<F> DrawTarget for F
where
    F: FnMut(SpriteKey, f32, f32),
{
    fn draw_sprite(&mut self, sprite: SpriteKey, x: f32, y: f32) {
        self(sprite, x, y);
    }
}

/// Ordered list of sprites making up one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    sprites: Vec<SpriteInstance>,
}

impl Scene {
    /// Creates a scene from sprites already in paint order.
    #[must_use]
    pub fn new(sprites: Vec<SpriteInstance>) -> Self {
        Self { sprites }
    }

    /// Replaces the scene contents with `other`.
    pub fn replace(&mut self, other: Scene) {
        self.sprites = other.sprites;
    }

    /// Sprites in paint order.
    #[must_use]
    pub fn sprites(&self) -> &[SpriteInstance] {
        &self.sprites
    }

    /// Issues one draw call per sprite, in paint order.
    pub fn draw<T: DrawTarget + ?Sized>(&self, target: &mut T) {
        for instance in &self.sprites {
            target.draw_sprite(instance.sprite, instance.origin.x, instance.origin.y);
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Direction requested on this frame, if any.
    pub direction: Option<Direction>,
}

impl FrameInput {
    /// Builds the frame input from a raw key code, ignoring unmapped keys.
    #[must_use]
    pub const fn from_key_code(code: u32) -> Self {
        Self {
            direction: direction_from_key_code(code),
        }
    }
}

/// Describes how the adapter should present the scene.
#[derive(Clone, Debug)]
pub struct Presentation {
    /// Title displayed by the window or headless report.
    pub window_title: String,
    /// Canvas size in pixels.
    pub canvas: Vec2,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, canvas: Vec2, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            canvas,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Bug Crossing scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and refreshes the scene before it is
    /// drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(direction_from_key_code(37), Some(Direction::Left));
        assert_eq!(direction_from_key_code(38), Some(Direction::Up));
        assert_eq!(direction_from_key_code(39), Some(Direction::Right));
        assert_eq!(direction_from_key_code(40), Some(Direction::Down));
        assert_eq!(direction_from_key_code(32), None);
        assert_eq!(FrameInput::from_key_code(13), FrameInput::default());
    }

    #[test]
    fn sprites_resolve_to_image_paths() {
        assert_eq!(SpriteKey::Enemy.asset_path(), "images/enemy-bug.png");
        assert_eq!(SpriteKey::Player.asset_path(), "images/char-boy.png");
    }

    #[test]
    fn scene_draws_in_paint_order() {
        let scene = Scene::new(vec![
            SpriteInstance::new(SpriteKey::Enemy, -101.0, 48.0),
            SpriteInstance::new(SpriteKey::Player, 202.0, 380.0),
        ]);

        let mut calls = Vec::new();
        let mut record = |sprite: SpriteKey, x: f32, y: f32| calls.push((sprite, x, y));
        scene.draw(&mut record);

        assert_eq!(
            calls,
            vec![
                (SpriteKey::Enemy, -101.0, 48.0),
                (SpriteKey::Player, 202.0, 380.0),
            ]
        );
    }

    #[test]
    fn replace_swaps_contents() {
        let mut scene = Scene::default();
        scene.replace(Scene::new(vec![SpriteInstance::new(
            SpriteKey::Player,
            0.0,
            0.0,
        )]));
        assert_eq!(scene.sprites().len(), 1);
    }
}
