use serde::Serialize;

use crate::grid::{Grid, Slot};
use crate::types::{Coord, OccupantId};

/// Read-only copy of the grid, row-major with row 0 at the bottom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BoardSnapshot {
    pub width: i32,
    pub height: i32,
    pub slots: Vec<Option<Slot>>,
}

impl BoardSnapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            slots: grid.slots().to_vec(),
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Slot> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        self.slots[(y * self.width + x) as usize]
    }

    pub fn occupant(&self, c: Coord) -> Option<OccupantId> {
        self.get(c.x, c.y).map(|slot| slot.occupant)
    }

    /// Rows as strings, top row first: `#` locked, `@` movable, `.` empty.
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| {
                (0..self.width)
                    .map(|x| match self.get(x, y) {
                        Some(slot) if slot.movable => '@',
                        Some(_) => '#',
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }
}

/// Snapshot of a whole session, for renderers and replays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub board: BoardSnapshot,
    pub active_piece: Option<u32>,
    pub pieces_spawned: u32,
    pub game_over: bool,
}
