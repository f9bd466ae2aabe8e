//! Board configuration, fixed at initialization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Coord, DEFAULT_CELL_SIZE, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Rows above the top a spawn anchor may sit. Keeps shape offsets and kicks
/// well inside `i32`.
pub const SPAWN_HEADROOM: i32 = 4;

/// Grid dimensions, cell size and spawn anchor.
///
/// All fields have defaults so a partial JSON object is accepted:
///
/// ```
/// use tilefall_types::{BoardConfig, Coord};
///
/// let cfg: BoardConfig = serde_json::from_str(r#"{"width": 6}"#).unwrap();
/// assert_eq!(cfg.width, 6);
/// assert_eq!(cfg.height, 20);
/// assert_eq!(cfg.spawn(), Coord::new(2, 18));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: f32,
    /// Anchor that shape offsets are added to on spawn.
    /// `None` means two rows below the top, just left of centre.
    pub spawn: Option<Coord>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            spawn: None,
        }
    }
}

impl BoardConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_spawn(mut self, spawn: Coord) -> Self {
        self.spawn = Some(spawn);
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Resolved spawn anchor.
    pub fn spawn(&self) -> Coord {
        self.spawn
            .unwrap_or_else(|| Coord::new(self.width / 2 - 1, self.height - 2))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Dimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        let spawn = self.spawn();
        if spawn.x < 0
            || spawn.x >= self.width
            || spawn.y < 0
            || spawn.y > self.height.saturating_add(SPAWN_HEADROOM)
        {
            return Err(ConfigError::Spawn(spawn));
        }
        Ok(())
    }
}

/// Rejected board configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    Dimensions { width: i32, height: i32 },
    CellSize(f32),
    Spawn(Coord),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Dimensions { width, height } => {
                write!(f, "board dimensions must be positive, got {width}x{height}")
            }
            ConfigError::CellSize(size) => {
                write!(f, "cell size must be a positive finite number, got {size}")
            }
            ConfigError::Spawn(spawn) => {
                write!(f, "spawn anchor {spawn} lies outside the board or its headroom")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
