use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use evade_core::{Corner, Direction, Event, HeldDirections, WindowExtent};
use evade_simulation::{Frame, Simulation};
use evade_system_respawn::SeededCorners;
use evade_world::World;
use proptest::prelude::*;

const SEED: u64 = 0x00c0_ffee_d00d_2024;

#[test]
fn deterministic_replay_produces_identical_runs() {
    let first = replay(scripted_frames(), SEED);
    let second = replay(scripted_frames(), SEED);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(
        !first.catches.is_empty(),
        "scripted run should be caught at least once"
    );
}

#[test]
fn catch_frames_end_with_zero_survival() {
    let outcome = replay(scripted_frames(), SEED);

    for record in outcome.frames.iter().filter(|record| record.caught.is_some()) {
        assert_eq!(record.survival_bits, 0.0f32.to_bits());
    }
}

#[test]
fn best_time_never_decreases_during_replay() {
    let outcome = replay(scripted_frames(), SEED);

    for pair in outcome.frames.windows(2) {
        let earlier = f32::from_bits(pair[0].best_bits);
        let later = f32::from_bits(pair[1].best_bits);
        assert!(later >= earlier, "best time dropped from {earlier} to {later}");
    }
}

fn replay(frames: Vec<Frame>, seed: u64) -> ReplayOutcome {
    let mut simulation = Simulation::new(World::new(), SeededCorners::new(seed));
    let mut records = Vec::with_capacity(frames.len());
    let mut catches = Vec::new();

    for frame in frames {
        let outcome = simulation.step(&frame);
        for event in simulation.events() {
            if let Event::PlayerCaught { corner, .. } = event {
                catches.push(*corner);
            }
        }
        records.push(FrameRecord::capture(&simulation, outcome.caught));
    }

    ReplayOutcome {
        frames: records,
        catches,
    }
}

fn scripted_frames() -> Vec<Frame> {
    let window = WindowExtent::new(800.0, 600.0);
    let dt = Duration::from_micros(16_667);
    let mut frames = Vec::new();

    // Idle long enough for the enemy to close in from (100, 100).
    frames.extend((0..240).map(|_| Frame {
        dt,
        held: HeldDirections::none(),
        window,
    }));
    // Run toward the bottom-right corner, then shrink the window.
    frames.extend((0..90).map(|_| Frame {
        dt,
        held: HeldDirections::none()
            .with(Direction::Down)
            .with(Direction::Right),
        window,
    }));
    frames.extend((0..240).map(|_| Frame {
        dt,
        held: HeldDirections::none().with(Direction::Left),
        window: WindowExtent::new(640.0, 480.0),
    }));

    frames
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    frames: Vec<FrameRecord>,
    catches: Vec<Corner>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.frames.hash(&mut hasher);
        self.catches.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct FrameRecord {
    player: (u32, u32),
    enemy: (u32, u32),
    survival_bits: u32,
    best_bits: u32,
    caught: Option<Corner>,
}

impl FrameRecord {
    fn capture(simulation: &Simulation<SeededCorners>, caught: Option<Corner>) -> Self {
        let player = simulation.player().bounds.origin();
        let enemy = simulation.enemy().bounds.origin();
        let score = simulation.score();
        Self {
            player: (player.x().to_bits(), player.y().to_bits()),
            enemy: (enemy.x().to_bits(), enemy.y().to_bits()),
            survival_bits: score.survival_time.to_bits(),
            best_bits: score.best_time.to_bits(),
            caught,
        }
    }
}

fn frame_strategy() -> impl Strategy<Value = Frame> {
    (
        any::<[bool; 4]>(),
        1u64..100_000,
        200.0f32..1_600.0,
        200.0f32..1_200.0,
    )
        .prop_map(|([up, down, left, right], micros, width, height)| Frame {
            dt: Duration::from_micros(micros),
            held: HeldDirections::from_flags(up, down, left, right),
            window: WindowExtent::new(width, height),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arbitrary_runs_respect_frame_invariants(
        frames in prop::collection::vec(frame_strategy(), 1..200),
        seed in any::<u64>(),
    ) {
        let mut simulation = Simulation::new(World::new(), SeededCorners::new(seed));
        let mut best = 0.0f32;

        for frame in &frames {
            let outcome = simulation.step(frame);
            let player = simulation.player().bounds;
            let score = simulation.score();

            prop_assert!(score.best_time >= best);
            best = score.best_time;

            match outcome.caught {
                Some(corner) => {
                    prop_assert_eq!(score.survival_time, 0.0);
                    prop_assert_eq!(
                        player.origin(),
                        corner.origin_for(frame.window, player.size())
                    );
                }
                None => {
                    prop_assert!(frame.window.bounds().contains(&player));
                    prop_assert!(score.survival_time > 0.0);
                }
            }
        }
    }
}
