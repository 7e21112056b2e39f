#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Keyboard-driven player movement confined to the window.

use std::time::Duration;

use evade_core::{
    Command, Direction, EntitySnapshot, HeldDirections, Position, Size, WindowExtent,
};

/// Pure system that turns held keys into player movement commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerControl;

impl PlayerControl {
    /// Emits the player's position for this frame.
    ///
    /// A move command is emitted every frame, even when no key is held, so the
    /// player is pulled back inside a window that shrank since the last frame.
    pub fn handle(
        &self,
        held: HeldDirections,
        player: &EntitySnapshot,
        window: WindowExtent,
        dt: Duration,
        out: &mut Vec<Command>,
    ) {
        let displaced = displace(player.bounds.origin(), held, player.speed, dt);
        let to = clamp_to_window(displaced, player.bounds.size(), window);
        out.push(Command::MovePlayer { to });
    }
}

/// Moves `origin` by `speed * dt` along every held direction.
///
/// Opposite directions cancel because both displacements are applied.
#[must_use]
pub fn displace(origin: Position, held: HeldDirections, speed: f32, dt: Duration) -> Position {
    let step = speed * dt.as_secs_f32();
    let (mut x, mut y) = (origin.x(), origin.y());
    for direction in held.iter() {
        match direction {
            Direction::Up => y -= step,
            Direction::Down => y += step,
            Direction::Left => x -= step,
            Direction::Right => x += step,
        }
    }
    Position::new(x, y)
}

/// Clamps a box of `size` at `origin` so it lies inside the window.
///
/// The near edge is clamped before the far edge. When the window is smaller
/// than the box, the far edge wins and the origin becomes negative.
#[must_use]
pub fn clamp_to_window(origin: Position, size: Size, window: WindowExtent) -> Position {
    Position::new(
        clamp_axis(origin.x(), size.width(), window.width()),
        clamp_axis(origin.y(), size.height(), window.height()),
    )
}

fn clamp_axis(start: f32, length: f32, limit: f32) -> f32 {
    let mut start = start.max(0.0);
    if start + length > limit {
        start = limit - length;
    }
    start
}
