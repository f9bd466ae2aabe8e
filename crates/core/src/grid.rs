//! Grid module - authoritative coordinate to occupant mapping
//!
//! Every coordinate of `[0, width) x [0, height)` is stored, row-major with row 0
//! at the bottom. Coordinates at or above `height` with an in-range column are
//! never stored and always read as free; that strip is where pieces spawn and
//! rotate before they are fully on the board.

use serde::Serialize;

use crate::error::BoundaryError;
use crate::types::{Coord, OccupantId};

/// Contents of an occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Slot {
    pub occupant: OccupantId,
    /// Set while the occupant belongs to the falling piece (or a compaction batch).
    pub movable: bool,
}

impl Slot {
    pub const fn movable(occupant: OccupantId) -> Self {
        Self {
            occupant,
            movable: true,
        }
    }

    pub const fn locked(occupant: OccupantId) -> Self {
        Self {
            occupant,
            movable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    slots: Vec<Option<Slot>>,
}

impl Grid {
    /// Create a grid with every stored coordinate empty.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            slots: vec![None; len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline(always)]
    fn index(&self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.y as usize) * (self.width as usize) + (c.x as usize))
    }

    /// True if the coordinate is part of the stored range.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    /// True for the open strip above the board.
    ///
    /// Measured on cell centres with unit cells this is `center.y > height`
    /// and `0 < center.x < width`, both strict.
    #[inline]
    pub fn is_above_top(&self, c: Coord) -> bool {
        c.y >= self.height && c.x >= 0 && c.x < self.width
    }

    /// Whether a cell may move into `c`.
    ///
    /// Slots holding a movable occupant count as free so the cells of one piece
    /// never block each other.
    pub fn is_free(&self, c: Coord) -> bool {
        match self.index(c) {
            Some(idx) => self.slots[idx].map_or(true, |slot| slot.movable),
            None => self.is_above_top(c),
        }
    }

    pub fn slot(&self, c: Coord) -> Option<Slot> {
        self.index(c).and_then(|idx| self.slots[idx])
    }

    pub fn occupant_at(&self, c: Coord) -> Option<OccupantId> {
        self.slot(c).map(|slot| slot.occupant)
    }

    /// Unconditional write.
    ///
    /// Writes into the open strip above the board are accepted and dropped.
    pub(crate) fn set(&mut self, c: Coord, slot: Option<Slot>) -> Result<(), BoundaryError> {
        match self.index(c) {
            Some(idx) => {
                self.slots[idx] = slot;
                Ok(())
            }
            None if self.is_above_top(c) => Ok(()),
            None => Err(BoundaryError {
                coord: c,
                width: self.width,
                height: self.height,
            }),
        }
    }

    /// Slots of one row, left to right. Empty for rows outside the stored range.
    pub fn row(&self, y: i32) -> impl Iterator<Item = (Coord, Option<Slot>)> + '_ {
        let width = if y >= 0 && y < self.height { self.width } else { 0 };
        (0..width).map(move |x| {
            let c = Coord::new(x, y);
            (c, self.slot(c))
        })
    }

    /// A row is full when it is stored and none of its slots is empty.
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height {
            return false;
        }
        self.row(y).all(|(_, slot)| slot.is_some())
    }

    /// All occupied slots, bottom row first.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Slot)> + '_ {
        let width = self.width as usize;
        self.slots.iter().enumerate().filter_map(move |(idx, slot)| {
            slot.map(|s| (Coord::new((idx % width) as i32, (idx / width) as i32), s))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn slots(&self) -> &[Option<Slot>] {
        &self.slots
    }
}
