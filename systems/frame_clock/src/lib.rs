#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame clock that turns monotonic timestamps into simulation ticks.

use std::time::Duration;

use evade_core::{Command, MIN_FRAME_DELTA};

/// Pure system that measures the time between consecutive frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    previous: Option<Duration>,
}

impl FrameClock {
    /// Creates a clock that has not observed any frame yet.
    ///
    /// The first frame measured by such a clock integrates with
    /// [`MIN_FRAME_DELTA`].
    #[must_use]
    pub const fn new() -> Self {
        Self { previous: None }
    }

    /// Creates a clock whose previous frame happened at `timestamp`.
    #[must_use]
    pub const fn starting_at(timestamp: Duration) -> Self {
        Self {
            previous: Some(timestamp),
        }
    }

    /// Timestamp of the last frame observed by the clock.
    #[must_use]
    pub const fn previous(&self) -> Option<Duration> {
        self.previous
    }

    /// Records the frame observed at `now` and emits the matching tick.
    ///
    /// Returns the delta that was emitted so callers can feed it to the
    /// remaining systems of the frame.
    pub fn handle(&mut self, now: Duration, out: &mut Vec<Command>) -> Duration {
        let dt = match self.previous {
            Some(previous) => frame_delta(previous, now),
            None => MIN_FRAME_DELTA,
        };
        self.previous = Some(now);
        out.push(Command::Tick { dt });
        dt
    }
}

/// Elapsed time between two monotonic timestamps.
///
/// Anomalies where `current` does not lie strictly after `previous` yield
/// [`MIN_FRAME_DELTA`].
#[must_use]
pub fn frame_delta(previous: Duration, current: Duration) -> Duration {
    match current.checked_sub(previous) {
        Some(delta) if !delta.is_zero() => delta,
        _ => MIN_FRAME_DELTA,
    }
}

/// Converts a raw delta expressed in seconds into the delta used downstream.
///
/// Values that are not strictly positive, including `NaN`, are replaced by
/// [`MIN_FRAME_DELTA`]. Values too large to represent saturate.
#[must_use]
pub fn effective_delta(seconds: f32) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return MIN_FRAME_DELTA;
    }
    Duration::try_from_secs_f32(seconds).unwrap_or(Duration::MAX)
}
