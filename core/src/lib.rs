#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Evade engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read immutable snapshots and
//! respond with [`Command`] values describing desired mutations, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values describing what changed. Adapters only ever observe the
//! world through snapshots.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Title used by the window that hosts the game.
pub const WINDOW_TITLE: &str = "Evade";

/// Smallest frame delta the simulation will ever integrate with.
///
/// Frame clocks substitute this value whenever the measured delta is not
/// strictly positive, so integration never stalls or runs backwards.
pub const MIN_FRAME_DELTA: Duration = Duration::from_millis(1);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the placement, size, speed and color of an entity.
    ConfigureEntity {
        /// Entity being configured.
        kind: EntityKind,
        /// Bounding box the entity occupies after configuration.
        bounds: Aabb,
        /// Movement speed expressed in pixels per second.
        speed: f32,
        /// Display color of the entity.
        color: EntityColor,
    },
    /// Advances the survival clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous frame.
        dt: Duration,
    },
    /// Moves the player to an already clamped position.
    MovePlayer {
        /// Top-left corner the player occupies after moving.
        to: Position,
    },
    /// Moves the enemy to the provided position.
    MoveEnemy {
        /// Top-left corner the enemy occupies after moving.
        to: Position,
    },
    /// Resets the survival clock and relocates the player to a window corner.
    RespawnPlayer {
        /// Corner selected for the respawn.
        corner: Corner,
        /// Top-left corner the player occupies after respawning.
        to: Position,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that an entity received a new configuration.
    EntityConfigured {
        /// Entity that was configured.
        kind: EntityKind,
    },
    /// Indicates that the survival clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player moved.
    PlayerMoved {
        /// Position occupied before the move.
        from: Position,
        /// Position occupied after the move.
        to: Position,
    },
    /// Confirms that the enemy moved.
    EnemyMoved {
        /// Position occupied before the move.
        from: Position,
        /// Position occupied after the move.
        to: Position,
    },
    /// Reports that the enemy caught the player and the player respawned.
    PlayerCaught {
        /// Corner the player respawned at.
        corner: Corner,
        /// Position the player occupied when the enemy reached them.
        caught_at: Position,
        /// Survival time in seconds that was discarded by the reset.
        survived: f32,
        /// Position the player occupies after respawning.
        respawn: Position,
    },
}

/// Identifies one of the two entities living in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The rectangle steered by the keyboard.
    Player,
    /// The rectangle chasing the player.
    Enemy,
}

/// Top-left coordinate of an entity expressed in window pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Width and height of an entity expressed in window pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }
}

/// Axis-aligned bounding box covering `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    origin: Position,
    size: Size,
}

impl Aabb {
    /// Creates a bounding box from its top-left corner and size.
    #[must_use]
    pub const fn new(origin: Position, size: Size) -> Self {
        Self { origin, size }
    }

    /// Creates a bounding box from raw `x, y, width, height` components.
    #[must_use]
    pub const fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Position::new(x, y), Size::new(width, height))
    }

    /// Top-left corner of the box.
    #[must_use]
    pub const fn origin(&self) -> Position {
        self.origin
    }

    /// Extent of the box.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Smallest horizontal coordinate covered by the box.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.origin.x
    }

    /// Smallest vertical coordinate covered by the box.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.origin.y
    }

    /// Exclusive horizontal bound of the box.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Exclusive vertical bound of the box.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Returns a copy of the box moved to the provided origin.
    #[must_use]
    pub const fn with_origin(self, origin: Position) -> Self {
        Self::new(origin, self.size)
    }

    /// Reports whether both boxes overlap with positive area.
    ///
    /// Boxes that merely share an edge, and boxes with an empty extent, never
    /// intersect.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let overlap_x = self.right().min(other.right()) - self.left().max(other.left());
        let overlap_y = self.bottom().min(other.bottom()) - self.top().max(other.top());
        overlap_x > 0.0 && overlap_y > 0.0
    }

    /// Reports whether `other` lies entirely inside this box, edges included.
    #[must_use]
    pub fn contains(&self, other: &Aabb) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Current drawable extent of the window in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowExtent {
    width: f32,
    height: f32,
}

impl WindowExtent {
    /// Creates a new window extent.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the window.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the window.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Bounding box spanning the whole window.
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        Aabb::from_rect(0.0, 0.0, self.width, self.height)
    }
}

/// Directional keys the player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing `y`.
    Up,
    /// Movement toward increasing `y`.
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Snapshot of which directional keys are held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeldDirections {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl HeldDirections {
    /// Snapshot with no keys held.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
        }
    }

    /// Creates a snapshot from the raw key flags.
    #[must_use]
    pub const fn from_flags(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Returns a copy of the snapshot with the provided direction held.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self { up: true, ..self },
            Direction::Down => Self { down: true, ..self },
            Direction::Left => Self { left: true, ..self },
            Direction::Right => Self { right: true, ..self },
        }
    }

    /// Whether the provided direction is held.
    #[must_use]
    pub const fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Whether no direction is held.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// Iterator over the held directions in [`Direction::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.is_held(*direction))
    }
}

/// Display color of an entity. Irrelevant to the simulation itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EntityColor {
    /// Creates a new entity color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Window corner the player may respawn at after being caught.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    /// `(0, 0)`.
    TopLeft,
    /// `(window width - player width, 0)`.
    TopRight,
    /// `(0, window height - player height)`.
    BottomLeft,
    /// `(window width - player width, window height - player height)`.
    BottomRight,
}

impl Corner {
    /// Every corner ordered by its draw index.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Maps a uniform draw over `0..4` onto a corner.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Corner::TopLeft),
            1 => Some(Corner::TopRight),
            2 => Some(Corner::BottomLeft),
            3 => Some(Corner::BottomRight),
            _ => None,
        }
    }

    /// Draw index associated with the corner.
    #[must_use]
    pub const fn index(&self) -> u8 {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomLeft => 2,
            Corner::BottomRight => 3,
        }
    }

    /// Top-left position that places a box of `size` flush into this corner.
    #[must_use]
    pub fn origin_for(&self, window: WindowExtent, size: Size) -> Position {
        let far_x = window.width() - size.width();
        let far_y = window.height() - size.height();
        match self {
            Corner::TopLeft => Position::new(0.0, 0.0),
            Corner::TopRight => Position::new(far_x, 0.0),
            Corner::BottomLeft => Position::new(0.0, far_y),
            Corner::BottomRight => Position::new(far_x, far_y),
        }
    }
}

/// Raw per-frame observations gathered by an adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Monotonic timestamp at which the frame started.
    pub timestamp: Duration,
    /// Directional keys held during the frame.
    pub held: HeldDirections,
    /// Window extent read during the frame.
    pub window: WindowExtent,
}

/// Read-only snapshot of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntitySnapshot {
    /// Entity described by the snapshot.
    pub kind: EntityKind,
    /// Bounding box occupied by the entity.
    pub bounds: Aabb,
    /// Movement speed in pixels per second.
    pub speed: f32,
    /// Display color.
    pub color: EntityColor,
}

/// Read-only snapshot of the survival clock.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreSnapshot {
    /// Seconds elapsed since the last catch.
    pub survival_time: f32,
    /// Longest survival time observed since the process started.
    pub best_time: f32,
}
