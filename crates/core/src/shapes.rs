//! Default shape catalogue - the seven tetrominoes
//!
//! Offsets are relative to the spawn anchor with y up. Every shape except O
//! pivots on its `(0, 0)` cell; O has no pivot and therefore never rotates.

use crate::spawn::ShapeDescriptor;
use crate::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tetromino {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::O,
        Tetromino::T,
        Tetromino::S,
        Tetromino::Z,
        Tetromino::J,
        Tetromino::L,
    ];

    pub fn offsets(self) -> [(i32, i32); 4] {
        match self {
            Tetromino::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            Tetromino::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Tetromino::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
            Tetromino::S => [(-1, 0), (0, 0), (0, 1), (1, 1)],
            Tetromino::Z => [(-1, 1), (0, 1), (0, 0), (1, 0)],
            Tetromino::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
            Tetromino::L => [(-1, 0), (0, 0), (1, 0), (1, 1)],
        }
    }

    pub fn pivot(self) -> Option<Coord> {
        match self {
            Tetromino::O => None,
            _ => Some(Coord::ZERO),
        }
    }

    pub fn shape(self) -> ShapeDescriptor {
        let offsets = self.offsets().iter().map(|&c| Coord::from(c)).collect();
        match ShapeDescriptor::new(offsets, self.pivot()) {
            Ok(shape) => shape,
            Err(err) => unreachable!("built-in {self:?} shape is malformed: {err}"),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(Tetromino::I),
            'O' => Some(Tetromino::O),
            'T' => Some(Tetromino::T),
            'S' => Some(Tetromino::S),
            'Z' => Some(Tetromino::Z),
            'J' => Some(Tetromino::J),
            'L' => Some(Tetromino::L),
            _ => None,
        }
    }
}

/// All seven tetromino shapes in [`Tetromino::ALL`] order.
pub fn tetrominoes() -> Vec<ShapeDescriptor> {
    Tetromino::ALL.iter().map(|t| t.shape()).collect()
}
