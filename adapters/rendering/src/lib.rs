#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Evade adapters.
//!
//! Renderers only consume [`Scene`] values. They never read back into the
//! simulation; the per-frame [`FrameInput`] they gather is handed to the
//! caller's update closure, which refreshes the scene before it is drawn.

use anyhow::Result as AnyResult;
use evade_core::{EntityColor, EntitySnapshot, FrameInput, ScoreSnapshot};
use glam::Vec2;
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<EntityColor> for Color {
    fn from(color: EntityColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Filled rectangle representing an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEntity {
    /// Top-left corner in window pixels.
    pub origin: Vec2,
    /// Width and height in window pixels.
    pub size: Vec2,
    /// Fill color.
    pub color: Color,
}

impl SceneEntity {
    /// Captures the drawable state of an entity snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &EntitySnapshot) -> Self {
        let origin = snapshot.bounds.origin();
        let size = snapshot.bounds.size();
        Self {
            origin: Vec2::new(origin.x(), origin.y()),
            size: Vec2::new(size.width(), size.height()),
            color: snapshot.color.into(),
        }
    }
}

/// Survival readout drawn on top of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    /// Seconds survived since the last catch.
    pub survival_time: f32,
    /// Longest survival time of the run.
    pub best_time: f32,
    /// Top-left corner of the text in window pixels.
    pub origin: Vec2,
    /// Glyph height in window pixels.
    pub font_size: f32,
    /// Text color.
    pub color: Color,
}

impl Hud {
    /// Default placement of the readout.
    pub const ORIGIN: Vec2 = Vec2::new(10.0, 10.0);
    /// Default glyph height.
    pub const FONT_SIZE: f32 = 24.0;

    /// Creates a readout for the provided score.
    #[must_use]
    pub fn new(score: ScoreSnapshot) -> Self {
        Self {
            survival_time: score.survival_time,
            best_time: score.best_time,
            origin: Self::ORIGIN,
            font_size: Self::FONT_SIZE,
            color: Color::WHITE,
        }
    }

    /// Text shown for the readout.
    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "TIME: {:.2} s | BEST: {:.2} s",
            self.survival_time, self.best_time
        )
    }
}

/// Scene description combining both entities and the score readout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scene {
    /// Rectangle steered by the keyboard.
    pub player: SceneEntity,
    /// Rectangle chasing the player.
    pub enemy: SceneEntity,
    /// Survival readout.
    pub hud: Hud,
}

impl Scene {
    /// Creates a new scene from world snapshots.
    #[must_use]
    pub fn new(player: &EntitySnapshot, enemy: &EntitySnapshot, score: ScoreSnapshot) -> Self {
        Self {
            player: SceneEntity::from_snapshot(player),
            enemy: SceneEntity::from_snapshot(enemy),
            hud: Hud::new(score),
        }
    }

    /// Refreshes the scene from world snapshots, keeping HUD styling.
    pub fn refresh(&mut self, player: &EntitySnapshot, enemy: &EntitySnapshot, score: ScoreSnapshot) {
        self.player = SceneEntity::from_snapshot(player);
        self.enemy = SceneEntity::from_snapshot(enemy);
        self.hud.survival_time = score.survival_time;
        self.hud.best_time = score.best_time;
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Width of the window when it opens.
    pub window_width: u32,
    /// Height of the window when it opens.
    pub window_height: u32,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    pub fn new<T>(
        window_title: T,
        window_width: u32,
        window_height: u32,
        clear_color: Color,
        scene: Scene,
    ) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if window_width == 0 || window_height == 0 {
            return Err(RenderingError::InvalidWindowSize {
                width: window_width,
                height: window_height,
            });
        }

        Ok(Self {
            window_title: window_title.into(),
            window_width,
            window_height,
            clear_color,
            scene,
        })
    }
}

/// Rendering backend capable of presenting Evade scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the input observed for
    /// the frame and refreshes the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The window must open with a positive extent.
    InvalidWindowSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWindowSize { width, height } => {
                write!(
                    f,
                    "window size must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
