//! Spawn coordinator and the piece-source boundary
//!
//! The coordinator asks a [`PieceSource`] for the next shape, builds a piece at
//! the configured anchor and hands it to the board. A spawn whose cells are not
//! all free is the game-over condition: the board is left untouched and the
//! event channel is told.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::board::BoardEngine;
use crate::error::ShapeError;
use crate::events::BoardEvents;
use crate::piece::Piece;
use crate::types::Coord;

/// Cell offsets of a shape plus its optional pivot offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeDescriptor {
    offsets: Vec<Coord>,
    pivot: Option<Coord>,
}

impl ShapeDescriptor {
    pub fn new(offsets: Vec<Coord>, pivot: Option<Coord>) -> Result<Self, ShapeError> {
        if offsets.is_empty() {
            return Err(ShapeError::Empty);
        }
        if offsets.len() > u16::MAX as usize {
            return Err(ShapeError::TooManyCells(offsets.len()));
        }
        let mut seen = HashSet::with_capacity(offsets.len());
        for &offset in &offsets {
            if !seen.insert(offset) {
                return Err(ShapeError::DuplicateOffset(offset));
            }
        }
        if let Some(p) = pivot {
            if !seen.contains(&p) {
                return Err(ShapeError::PivotNotInShape(p));
            }
        }
        Ok(Self { offsets, pivot })
    }

    pub fn offsets(&self) -> &[Coord] {
        &self.offsets
    }

    pub fn pivot(&self) -> Option<Coord> {
        self.pivot
    }

    pub(crate) fn pivot_index(&self) -> Option<usize> {
        let pivot = self.pivot?;
        self.offsets.iter().position(|&o| o == pivot)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Supplier of shapes. Implementations should be seedable so games replay.
pub trait PieceSource {
    /// Consume the staged shape and stage the one after it.
    fn next_shape(&mut self) -> ShapeDescriptor;

    /// Shape that the next call to `next_shape` will return, for preview.
    fn peek_shape(&self) -> Option<&ShapeDescriptor> {
        None
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_shape(&mut self) -> ShapeDescriptor {
        (**self).next_shape()
    }

    fn peek_shape(&self) -> Option<&ShapeDescriptor> {
        (**self).peek_shape()
    }
}

/// Cycles through a fixed list of shapes.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    shapes: Vec<ShapeDescriptor>,
    index: usize,
}

impl ScriptedSource {
    /// # Panics
    ///
    /// Panics if `shapes` is empty.
    pub fn new(shapes: Vec<ShapeDescriptor>) -> Self {
        assert!(!shapes.is_empty(), "scripted source needs at least one shape");
        Self { shapes, index: 0 }
    }
}

impl PieceSource for ScriptedSource {
    fn next_shape(&mut self) -> ShapeDescriptor {
        let shape = self.shapes[self.index].clone();
        self.index = (self.index + 1) % self.shapes.len();
        shape
    }

    fn peek_shape(&self) -> Option<&ShapeDescriptor> {
        self.shapes.get(self.index)
    }
}

/// Result of [`SpawnCoordinator::spawn_next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(Piece),
    /// The spawn area was blocked; the game is over.
    Blocked,
}

#[derive(Debug, Clone)]
pub struct SpawnCoordinator<S> {
    source: S,
    anchor: Coord,
    /// Serial of the next successfully spawned piece.
    next_piece_id: u32,
}

impl<S: PieceSource> SpawnCoordinator<S> {
    pub fn new(source: S, anchor: Coord) -> Self {
        Self {
            source,
            anchor,
            next_piece_id: 1,
        }
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn preview(&self) -> Option<&ShapeDescriptor> {
        self.source.peek_shape()
    }

    /// Number of pieces successfully spawned so far.
    pub fn spawned(&self) -> u32 {
        self.next_piece_id - 1
    }

    pub fn spawn_next<E: BoardEvents>(&mut self, board: &mut BoardEngine<E>) -> SpawnOutcome {
        let shape = self.source.next_shape();
        let mut piece = Piece::from_shape(self.next_piece_id, &shape, self.anchor);

        if !board.place_piece(&mut piece) {
            info!(piece = piece.id(), anchor = %self.anchor, "spawn blocked, game over");
            board.events_mut().on_game_over();
            return SpawnOutcome::Blocked;
        }

        self.next_piece_id += 1;
        debug!(piece = piece.id(), cells = piece.cells().len(), "piece spawned");
        board.events_mut().on_piece_spawned(piece.id());
        SpawnOutcome::Spawned(piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_validation() {
        assert_eq!(ShapeDescriptor::new(vec![], None), Err(ShapeError::Empty));
        assert_eq!(
            ShapeDescriptor::new(vec![Coord::ZERO, Coord::ZERO], None),
            Err(ShapeError::DuplicateOffset(Coord::ZERO))
        );
        assert_eq!(
            ShapeDescriptor::new(vec![Coord::ZERO], Some(Coord::new(1, 0))),
            Err(ShapeError::PivotNotInShape(Coord::new(1, 0)))
        );
        let ok = ShapeDescriptor::new(vec![Coord::ZERO, Coord::new(1, 0)], Some(Coord::new(1, 0)))
            .unwrap();
        assert_eq!(ok.pivot_index(), Some(1));
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn scripted_source_cycles_and_previews() {
        let a = ShapeDescriptor::new(vec![Coord::ZERO], None).unwrap();
        let b = ShapeDescriptor::new(vec![Coord::ZERO, Coord::new(0, 1)], None).unwrap();
        let mut source = ScriptedSource::new(vec![a.clone(), b.clone()]);

        assert_eq!(source.peek_shape(), Some(&a));
        assert_eq!(source.next_shape(), a);
        assert_eq!(source.peek_shape(), Some(&b));
        assert_eq!(source.next_shape(), b);
        assert_eq!(source.next_shape(), a);
    }
}
