//! Error types surfaced by the core.
//!
//! Illegal moves are not errors (they are plain `false` results) and game over
//! is a state transition, so only defects and malformed inputs live here.

use std::fmt;

use crate::types::Coord;

/// A grid write targeted a coordinate outside the stored range and outside
/// the open strip above the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryError {
    pub coord: Coord,
    pub width: i32,
    pub height: i32,
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grid write at {} is outside the {}x{} board",
            self.coord, self.width, self.height
        )
    }
}

impl std::error::Error for BoundaryError {}

/// A shape descriptor that cannot form a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    Empty,
    DuplicateOffset(Coord),
    PivotNotInShape(Coord),
    TooManyCells(usize),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Empty => write!(f, "shape has no cells"),
            ShapeError::DuplicateOffset(c) => write!(f, "shape lists offset {c} twice"),
            ShapeError::PivotNotInShape(c) => write!(f, "pivot {c} is not one of the shape's cells"),
            ShapeError::TooManyCells(n) => write!(f, "shape has {n} cells, more than a piece can index"),
        }
    }
}

impl std::error::Error for ShapeError {}
