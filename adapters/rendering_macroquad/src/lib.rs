#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Evade.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The adapter samples the arrow keys, the window extent and an
//! [`Instant`]-based timestamp once per frame, hands them to the caller's
//! update closure and then draws the refreshed [`Scene`].

use anyhow::{Context, Result};
use evade_core::{FrameInput, HeldDirections, WindowExtent};
use evade_rendering::{Color, Hud, Presentation, RenderingBackend, Scene, SceneEntity};
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }
}

/// Arrow keys currently held down.
fn poll_held_directions() -> HeldDirections {
    HeldDirections::from_flags(
        is_key_down(KeyCode::Up),
        is_key_down(KeyCode::Down),
        is_key_down(KeyCode::Left),
        is_key_down(KeyCode::Right),
    )
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the swap interval requested when creating the window.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Enables or disables vertical sync.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Logs the measured frame rate once per second when enabled.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

/// Frame rates reported by [`FpsCounter`].
#[doc(hidden)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsMetrics {
    /// Frames rendered per second over the last reporting interval.
    pub per_second: f32,
    /// Frames rendered per second over the trailing ten seconds.
    pub trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing
    /// ten-second averages once one second has elapsed.
    pub fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            window_width,
            window_height,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(window_width)
                .with_context(|| format!("window width {window_width} is out of range"))?,
            window_height: i32::try_from(window_height)
                .with_context(|| format!("window height {window_height} is out of range"))?,
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let started = Instant::now();
            let mut previous_frame = started;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    log::debug!("quit requested");
                    break;
                }

                let now = Instant::now();
                let frame_input = FrameInput {
                    timestamp: frame_timestamp(started, now),
                    held: poll_held_directions(),
                    window: WindowExtent::new(
                        macroquad::window::screen_width(),
                        macroquad::window::screen_height(),
                    ),
                };

                update_scene(frame_input, &mut scene);

                macroquad::window::clear_background(background);
                draw_entity(&scene.enemy);
                draw_entity(&scene.player);
                draw_hud(&scene.hud);

                let frame = frame_timestamp(previous_frame, now);
                previous_frame = now;
                if let Some(FpsMetrics {
                    per_second,
                    trailing_ten_seconds,
                }) = fps_counter.record_frame(frame)
                {
                    if show_fps {
                        log::info!("FPS: {per_second:.2} (10s avg: {trailing_ten_seconds:.2})");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Time elapsed from `start` to `now` on the monotonic clock.
///
/// Macroquad's own `get_time` follows the system clock, so a wall-clock
/// adjustment would otherwise land in a single frame delta.
fn frame_timestamp(start: Instant, now: Instant) -> Duration {
    now.saturating_duration_since(start)
}

fn draw_entity(entity: &SceneEntity) {
    macroquad::shapes::draw_rectangle(
        entity.origin.x,
        entity.origin.y,
        entity.size.x,
        entity.size.y,
        to_macroquad_color(entity.color),
    );
}

fn draw_hud(hud: &Hud) {
    let (x, y) = hud_baseline(hud);
    let _ = macroquad::text::draw_text(
        &hud.text(),
        x,
        y,
        hud.font_size,
        to_macroquad_color(hud.color),
    );
}

/// Macroquad positions text by its baseline rather than its top edge.
fn hud_baseline(hud: &Hud) -> (f32, f32) {
    (hud.origin.x, hud.origin.y + hud.font_size)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evade_core::ScoreSnapshot;

    #[test]
    fn frame_timestamp_measures_from_loop_start() {
        let started = Instant::now();
        let first = started + Duration::from_millis(1_000);
        let second = first + Duration::from_millis(16);

        assert_eq!(frame_timestamp(started, started), Duration::ZERO);
        assert_eq!(frame_timestamp(started, first), Duration::from_millis(1_000));
        assert_eq!(
            frame_timestamp(started, second) - frame_timestamp(started, first),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn frame_timestamp_never_runs_backwards() {
        let started = Instant::now();
        let earlier = started
            .checked_sub(Duration::from_millis(5))
            .unwrap_or(started);

        assert_eq!(frame_timestamp(started, earlier), Duration::ZERO);
    }

    #[test]
    fn hud_text_sits_below_its_origin() {
        let hud = Hud::new(ScoreSnapshot::default());

        let (x, y) = hud_baseline(&hud);

        assert_eq!(x, Hud::ORIGIN.x);
        assert_eq!(y, Hud::ORIGIN.y + Hud::FONT_SIZE);
    }

    #[test]
    fn colors_convert_channel_for_channel() {
        let converted = to_macroquad_color(Color::new(0.25, 0.5, 0.75, 1.0));

        assert_eq!(converted.r, 0.25);
        assert_eq!(converted.g, 0.5);
        assert_eq!(converted.b, 0.75);
        assert_eq!(converted.a, 1.0);
    }

    #[test]
    fn vsync_toggles_swap_interval() {
        assert_eq!(MacroquadBackend::new().swap_interval, None);
        assert_eq!(
            MacroquadBackend::new().with_vsync(false).swap_interval,
            Some(0)
        );
        assert_eq!(
            MacroquadBackend::new().with_vsync(true).swap_interval,
            Some(1)
        );
    }
}
