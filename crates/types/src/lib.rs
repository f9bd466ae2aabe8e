//! Core types module - shared data structures and constants
//!
//! Pure data shared by the engine, the terminal view and the driver. Nothing in
//! this crate performs I/O.
//!
//! # Coordinates
//!
//! Cells are addressed by integer `(x, y)` indices with **y increasing upward**:
//!
//! - `x` ranges `0..width` (left to right)
//! - `y` ranges `0..height` (bottom to top)
//! - rows at or above `height` form the open strip pieces may spawn or rotate into
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 10 | Columns |
//! | `DEFAULT_HEIGHT` | 20 | Rows |
//! | `DEFAULT_CELL_SIZE` | 1.0 | World units per cell |
//! | `DEFAULT_BASE_DROP_MS` | 1000 | Initial automatic drop delay |
//! | `DEFAULT_MIN_DROP_MS` | 150 | Delay the drop pace eases toward |
//!
//! # Examples
//!
//! ```
//! use tilefall_types::{Coord, Direction, GameAction};
//!
//! let c = Coord::new(3, 4);
//! assert_eq!(c + Direction::Down.delta(), Coord::new(3, 3));
//! assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
//! ```

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

pub mod config;

pub use config::{BoardConfig, ConfigError, SPAWN_HEADROOM};

/// Default board width in cells
pub const DEFAULT_WIDTH: i32 = 10;

/// Default board height in cells
pub const DEFAULT_HEIGHT: i32 = 20;

/// Default edge length of a cell in world units
pub const DEFAULT_CELL_SIZE: f32 = 1.0;

/// Initial automatic drop delay in milliseconds
pub const DEFAULT_BASE_DROP_MS: u64 = 1000;

/// Drop delay the pace converges on as pieces are spawned
pub const DEFAULT_MIN_DROP_MS: u64 = 150;

/// Integer cell coordinate, y up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ZERO: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotate this offset 90° clockwise about the origin: `(x, y) -> (y, -x)`.
    #[inline]
    pub const fn rotate_cw(self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    /// Centre of the cell in world units for the given cell size.
    pub fn center(self, cell_size: f32) -> (f32, f32) {
        (
            (self.x as f32 + 0.5) * cell_size,
            (self.y as f32 + 0.5) * cell_size,
        )
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

/// One-cell translation a piece can be asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Unit step vector for this direction.
    pub const fn delta(self) -> Coord {
        match self {
            Direction::Left => Coord::new(-1, 0),
            Direction::Right => Coord::new(1, 0),
            Direction::Down => Coord::new(0, -1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}

/// Opaque handle linking a cell back to whatever visual object represents it.
///
/// The engine only stores, compares and forwards these. `piece` is the serial of
/// the piece the cell was spawned with and `cell` its index inside that piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccupantId {
    pub piece: u32,
    pub cell: u16,
}

impl OccupantId {
    pub const fn new(piece: u32, cell: u16) -> Self {
        Self { piece, cell }
    }
}

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.piece, self.cell)
    }
}

/// Player-facing commands, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if blocked
    MoveDown,
    /// Rotate piece 90° clockwise about its pivot
    Rotate,
    /// Toggle pause state (driver-side)
    Pause,
    /// Start a fresh session
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("MOVEDOWN"), Some(GameAction::MoveDown));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// camelCase name, used in replay output
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }

    /// Movement direction carried by this action, if any.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            GameAction::MoveDown => Some(Direction::Down),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_cw_turns_right_into_down() {
        assert_eq!(Coord::new(1, 0).rotate_cw(), Coord::new(0, -1));
        assert_eq!(Coord::new(0, -1).rotate_cw(), Coord::new(-1, 0));
        let full_turn = Coord::new(2, 1)
            .rotate_cw()
            .rotate_cw()
            .rotate_cw()
            .rotate_cw();
        assert_eq!(full_turn, Coord::new(2, 1));
    }

    #[test]
    fn cell_center_is_half_a_cell_in() {
        assert_eq!(Coord::new(0, 0).center(1.0), (0.5, 0.5));
        assert_eq!(Coord::new(3, 2).center(2.0), (7.0, 5.0));
    }

    #[test]
    fn action_names_round_trip() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::MoveDown,
            GameAction::Rotate,
            GameAction::Pause,
            GameAction::Restart,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn direction_serializes_camel_case() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
    }
}
