#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy pursuit that chases the player one axis at a time.
//!
//! Each axis is compared independently, so the enemy closes in diagonally at
//! up to `speed * sqrt(2)` whenever both coordinates differ. The enemy is not
//! confined to the window.

use std::time::Duration;

use evade_core::{Command, EntitySnapshot, Position};

/// Pure system that steers the enemy toward the player.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Emits the enemy's position for this frame.
    ///
    /// `player` must reflect the player's position after this frame's
    /// movement has been applied.
    pub fn handle(
        &self,
        enemy: &EntitySnapshot,
        player: &EntitySnapshot,
        dt: Duration,
        out: &mut Vec<Command>,
    ) {
        let to = chase(
            enemy.bounds.origin(),
            player.bounds.origin(),
            enemy.speed * dt.as_secs_f32(),
        );
        out.push(Command::MoveEnemy { to });
    }
}

/// Moves `from` toward `target` by `step` along each axis.
#[must_use]
pub fn chase(from: Position, target: Position, step: f32) -> Position {
    Position::new(
        chase_axis(from.x(), target.x(), step),
        chase_axis(from.y(), target.y(), step),
    )
}

/// Moves `current` toward `target` by `step`.
///
/// Both comparisons run in sequence against the updated coordinate. A step
/// that would overshoot from below is therefore undone in the same frame,
/// while a step that overshoots from above is kept.
#[must_use]
pub fn chase_axis(current: f32, target: f32, step: f32) -> f32 {
    let mut current = current;
    if current < target {
        current += step;
    }
    if current > target {
        current -= step;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overshoot_from_below_is_undone() {
        assert_eq!(chase_axis(95.0, 100.0, 15.0), 95.0);
    }

    #[test]
    fn overshoot_from_above_is_kept() {
        assert_eq!(chase_axis(105.0, 100.0, 15.0), 90.0);
    }

    #[test]
    fn matching_axis_holds_still() {
        assert_eq!(chase_axis(100.0, 100.0, 15.0), 100.0);
    }
}
