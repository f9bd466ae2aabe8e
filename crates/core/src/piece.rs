//! Cells and pieces.

use std::collections::BTreeSet;

use crate::spawn::ShapeDescriptor;
use crate::types::{Coord, OccupantId};

/// A single grid-aligned block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub(crate) coord: Coord,
    pub(crate) occupant: OccupantId,
    pub(crate) movable: bool,
}

impl Cell {
    pub fn new(coord: Coord, occupant: OccupantId) -> Self {
        Self {
            coord,
            occupant,
            movable: false,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn occupant(&self) -> OccupantId {
        self.occupant
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    /// World-space centre of the cell.
    pub fn center(&self, cell_size: f32) -> (f32, f32) {
        self.coord.center(cell_size)
    }
}

/// A rigid group of cells that moves and rotates together until it locks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: u32,
    cells: Vec<Cell>,
    /// Index into `cells`; `None` makes the piece non-rotatable.
    pivot: Option<usize>,
}

impl Piece {
    /// Build a piece from a validated shape, anchored at `anchor`.
    pub fn from_shape(id: u32, shape: &ShapeDescriptor, anchor: Coord) -> Self {
        let cells = shape
            .offsets()
            .iter()
            .enumerate()
            .map(|(i, &offset)| Cell::new(anchor + offset, OccupantId::new(id, i as u16)))
            .collect();
        Self {
            id,
            cells,
            pivot: shape.pivot_index(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn pivot(&self) -> Option<&Cell> {
        self.pivot.and_then(|i| self.cells.get(i))
    }

    pub fn is_rotatable(&self) -> bool {
        self.pivot.is_some()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().map(|c| c.coord)
    }

    /// Rows touched by the piece, deduplicated and ascending.
    pub fn rows(&self) -> BTreeSet<i32> {
        self.cells.iter().map(|c| c.coord.y).collect()
    }

    pub(crate) fn set_movable(&mut self, movable: bool) {
        for cell in &mut self.cells {
            cell.movable = movable;
        }
    }

    pub(crate) fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}
