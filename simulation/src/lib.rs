#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-frame simulation step for Evade.
//!
//! A frame runs the systems in a fixed order, applying each system's commands
//! before the next one observes the world:
//!
//! 1. the frame clock emits the tick that advances the survival clock,
//! 2. the player controller moves and clamps the player,
//! 3. the pursuit system moves the enemy toward the player's new position,
//! 4. the respawn system resolves a catch against the post-movement boxes.
//!
//! Nothing here touches a window or a renderer, so whole games can be stepped
//! headlessly.

use std::time::Duration;

use evade_core::{
    Command, Corner, EntitySnapshot, Event, FrameInput, HeldDirections, ScoreSnapshot,
    WindowExtent, MIN_FRAME_DELTA,
};
use evade_system_frame_clock::FrameClock;
use evade_system_player_control::PlayerControl;
use evade_system_pursuit::Pursuit;
use evade_system_respawn::{CornerSource, Respawn};
use evade_world::{self as world, query, World};

/// Everything a frame needs once its delta time is known.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Time elapsed since the previous frame.
    pub dt: Duration,
    /// Directional keys held during the frame.
    pub held: HeldDirections,
    /// Window extent read during the frame.
    pub window: WindowExtent,
}

/// Summary of a single simulated frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Delta time the frame integrated with.
    pub dt: Duration,
    /// Corner the player respawned at when the enemy caught them.
    pub caught: Option<Corner>,
}

/// Advances `world` by one frame whose delta time is already known.
///
/// A zero `dt` is replaced by [`MIN_FRAME_DELTA`]. Events produced by the
/// frame are appended to `out_events` in application order.
pub fn step<S: CornerSource>(
    world: &mut World,
    frame: &Frame,
    respawn: &mut Respawn<S>,
    out_events: &mut Vec<Event>,
) -> StepOutcome {
    let dt = if frame.dt.is_zero() {
        MIN_FRAME_DELTA
    } else {
        frame.dt
    };
    apply_all(world, vec![Command::Tick { dt }], out_events);
    let caught = move_and_resolve(world, frame.held, frame.window, dt, respawn, out_events);
    StepOutcome { dt, caught }
}

fn move_and_resolve<S: CornerSource>(
    world: &mut World,
    held: HeldDirections,
    window: WindowExtent,
    dt: Duration,
    respawn: &mut Respawn<S>,
    out_events: &mut Vec<Event>,
) -> Option<Corner> {
    let mut commands = Vec::new();

    PlayerControl.handle(held, &query::player(world), window, dt, &mut commands);
    apply_all(world, std::mem::take(&mut commands), out_events);

    Pursuit.handle(
        &query::enemy(world),
        &query::player(world),
        dt,
        &mut commands,
    );
    apply_all(world, std::mem::take(&mut commands), out_events);

    let caught = respawn.handle(
        &query::player(world),
        &query::enemy(world),
        window,
        &mut commands,
    );
    apply_all(world, commands, out_events);

    caught
}

fn apply_all(world: &mut World, commands: Vec<Command>, out_events: &mut Vec<Event>) {
    for command in commands {
        world::apply(world, command, out_events);
    }
}

/// Owns the world together with the systems that drive it.
#[derive(Debug)]
pub struct Simulation<S> {
    world: World,
    clock: FrameClock,
    respawn: Respawn<S>,
    events: Vec<Event>,
}

impl<S: CornerSource> Simulation<S> {
    /// Creates a simulation over `world` drawing respawn corners from `corners`.
    #[must_use]
    pub fn new(world: World, corners: S) -> Self {
        Self {
            world,
            clock: FrameClock::new(),
            respawn: Respawn::new(corners),
            events: Vec::new(),
        }
    }

    /// Uses `clock` to measure frame deltas instead of a fresh clock.
    #[must_use]
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Advances the simulation by the frame observed at `input.timestamp`.
    pub fn advance(&mut self, input: FrameInput) -> StepOutcome {
        self.events.clear();
        let mut commands = Vec::new();
        let dt = self.clock.handle(input.timestamp, &mut commands);
        apply_all(&mut self.world, commands, &mut self.events);
        let caught = move_and_resolve(
            &mut self.world,
            input.held,
            input.window,
            dt,
            &mut self.respawn,
            &mut self.events,
        );
        self.log_catch();
        StepOutcome { dt, caught }
    }

    /// Advances the simulation by a frame whose delta time is already known.
    pub fn step(&mut self, frame: &Frame) -> StepOutcome {
        self.events.clear();
        let outcome = step(&mut self.world, frame, &mut self.respawn, &mut self.events);
        self.log_catch();
        outcome
    }

    fn log_catch(&self) {
        for event in &self.events {
            if let Event::PlayerCaught {
                corner,
                caught_at,
                survived,
                respawn,
            } = event
            {
                let best = query::score(&self.world).best_time;
                let record = if *survived >= best { " (new best)" } else { "" };
                log::info!(
                    "caught after {survived:.2}s{record} at ({:.1}, {:.1}); respawning at {corner:?} ({:.1}, {:.1})",
                    caught_at.x(),
                    caught_at.y(),
                    respawn.x(),
                    respawn.y(),
                );
            }
        }
    }

    /// Events produced by the most recent frame.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Read-only access to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current player snapshot.
    #[must_use]
    pub fn player(&self) -> EntitySnapshot {
        query::player(&self.world)
    }

    /// Current enemy snapshot.
    #[must_use]
    pub fn enemy(&self) -> EntitySnapshot {
        query::enemy(&self.world)
    }

    /// Current survival and best times.
    #[must_use]
    pub fn score(&self) -> ScoreSnapshot {
        query::score(&self.world)
    }
}
