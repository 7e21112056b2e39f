#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for Evade.
//!
//! The world owns both entities and the survival clock. It never decides
//! anything on its own: systems propose [`Command`] values and [`apply`]
//! executes them, reporting every change through [`Event`] values.

use evade_core::{
    Aabb, Command, EntityColor, EntityKind, EntitySnapshot, Event, Position, Size,
};

const PLAYER_ORIGIN: Position = Position::new(400.0, 300.0);
const PLAYER_SIZE: Size = Size::new(50.0, 50.0);
const PLAYER_SPEED: f32 = 300.0;
const PLAYER_COLOR: EntityColor = EntityColor::from_rgb(255, 50, 50);

const ENEMY_ORIGIN: Position = Position::new(100.0, 100.0);
const ENEMY_SIZE: Size = Size::new(50.0, 50.0);
const ENEMY_SPEED: f32 = 150.0;
const ENEMY_COLOR: EntityColor = EntityColor::from_rgb(50, 50, 255);

#[derive(Clone, Debug)]
struct Entity {
    kind: EntityKind,
    bounds: Aabb,
    speed: f32,
    color: EntityColor,
}

impl Entity {
    const fn new(kind: EntityKind, bounds: Aabb, speed: f32, color: EntityColor) -> Self {
        Self {
            kind,
            bounds,
            speed,
            color,
        }
    }

    fn move_to(&mut self, to: Position) -> Position {
        let from = self.bounds.origin();
        self.bounds = self.bounds.with_origin(to);
        from
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            kind: self.kind,
            bounds: self.bounds,
            speed: self.speed,
            color: self.color,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct SurvivalClock {
    survival_time: f32,
    best_time: f32,
}

impl SurvivalClock {
    fn advance(&mut self, seconds: f32) {
        self.survival_time += seconds;
        if self.survival_time > self.best_time {
            self.best_time = self.survival_time;
        }
    }

    fn reset(&mut self) -> f32 {
        std::mem::take(&mut self.survival_time)
    }
}

/// Represents the authoritative Evade world state.
#[derive(Clone, Debug)]
pub struct World {
    player: Entity,
    enemy: Entity,
    clock: SurvivalClock,
    tick_index: u64,
}

impl World {
    /// Creates a new world with the default entity placements.
    #[must_use]
    pub fn new() -> Self {
        Self {
            player: Entity::new(
                EntityKind::Player,
                Aabb::new(PLAYER_ORIGIN, PLAYER_SIZE),
                PLAYER_SPEED,
                PLAYER_COLOR,
            ),
            enemy: Entity::new(
                EntityKind::Enemy,
                Aabb::new(ENEMY_ORIGIN, ENEMY_SIZE),
                ENEMY_SPEED,
                ENEMY_COLOR,
            ),
            clock: SurvivalClock::default(),
            tick_index: 0,
        }
    }

    fn entity_mut(&mut self, kind: EntityKind) -> &mut Entity {
        match kind {
            EntityKind::Player => &mut self.player,
            EntityKind::Enemy => &mut self.enemy,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureEntity {
            kind,
            bounds,
            speed,
            color,
        } => {
            *world.entity_mut(kind) = Entity::new(kind, bounds, speed, color);
            out_events.push(Event::EntityConfigured { kind });
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.clock.advance(dt.as_secs_f32());
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { to } => {
            let from = world.player.move_to(to);
            out_events.push(Event::PlayerMoved { from, to });
        }
        Command::MoveEnemy { to } => {
            let from = world.enemy.move_to(to);
            out_events.push(Event::EnemyMoved { from, to });
        }
        Command::RespawnPlayer { corner, to } => {
            let survived = world.clock.reset();
            let caught_at = world.player.move_to(to);
            out_events.push(Event::PlayerCaught {
                corner,
                caught_at,
                survived,
                respawn: to,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use evade_core::{EntitySnapshot, ScoreSnapshot};

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> EntitySnapshot {
        world.player.snapshot()
    }

    /// Captures the enemy's current state.
    #[must_use]
    pub fn enemy(world: &World) -> EntitySnapshot {
        world.enemy.snapshot()
    }

    /// Captures the survival and best times.
    #[must_use]
    pub fn score(world: &World) -> ScoreSnapshot {
        ScoreSnapshot {
            survival_time: world.clock.survival_time,
            best_time: world.clock.best_time,
        }
    }

    /// Number of ticks applied since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
