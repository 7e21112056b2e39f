#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision detection between player and enemy, and corner respawns.
//!
//! The corner picked after a catch comes from a [`CornerSource`]. The game
//! draws from a seeded [`SeededCorners`] generator while replays and tests
//! can script the exact sequence with [`ScriptedCorners`].

use evade_core::{Command, Corner, EntitySnapshot, WindowExtent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies the corner the player respawns at after each catch.
pub trait CornerSource {
    /// Draws the next corner.
    fn next_corner(&mut self) -> Corner;
}

impl<S: CornerSource + ?Sized> CornerSource for &mut S {
    fn next_corner(&mut self) -> Corner {
        (**self).next_corner()
    }
}

/// Uniform corner draws backed by a seeded ChaCha generator.
#[derive(Clone, Debug)]
pub struct SeededCorners {
    rng: ChaCha8Rng,
}

impl SeededCorners {
    /// Creates a generator that replays identically for the same seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl CornerSource for SeededCorners {
    fn next_corner(&mut self) -> Corner {
        Corner::ALL[self.rng.gen_range(0..Corner::ALL.len())]
    }
}

/// Corner source that cycles through a fixed sequence.
#[derive(Clone, Debug)]
pub struct ScriptedCorners {
    corners: Vec<Corner>,
    cursor: usize,
}

impl ScriptedCorners {
    /// Creates a source that yields `corners` in order and then starts over.
    ///
    /// An empty sequence always yields [`Corner::TopLeft`].
    #[must_use]
    pub fn new(corners: Vec<Corner>) -> Self {
        Self { corners, cursor: 0 }
    }
}

impl CornerSource for ScriptedCorners {
    fn next_corner(&mut self) -> Corner {
        let Some(corner) = self.corners.get(self.cursor).copied() else {
            return Corner::TopLeft;
        };
        self.cursor = (self.cursor + 1) % self.corners.len();
        corner
    }
}

/// Pure system that detects catches and emits respawn commands.
#[derive(Clone, Debug)]
pub struct Respawn<S> {
    corners: S,
}

impl<S: CornerSource> Respawn<S> {
    /// Creates a respawn system drawing corners from `corners`.
    #[must_use]
    pub fn new(corners: S) -> Self {
        Self { corners }
    }

    /// Emits a respawn command when the player and enemy overlap.
    ///
    /// `window` must be the extent read during the current frame. Returns the
    /// corner that was selected, if any.
    pub fn handle(
        &mut self,
        player: &EntitySnapshot,
        enemy: &EntitySnapshot,
        window: WindowExtent,
        out: &mut Vec<Command>,
    ) -> Option<Corner> {
        if !player.bounds.intersects(&enemy.bounds) {
            return None;
        }

        let corner = self.corners.next_corner();
        let to = corner.origin_for(window, player.bounds.size());
        out.push(Command::RespawnPlayer { corner, to });
        Some(corner)
    }

    /// Releases the corner source.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.corners
    }
}
