//! Core engine - pure, deterministic, and testable
//!
//! This crate holds the falling-block rules and nothing else: no rendering, no
//! input polling, no timers. A driver owns the loop and calls into a
//! [`Session`] (or the lower-level [`BoardEngine`]) one discrete command at a time.
//!
//! # Module Structure
//!
//! - [`grid`]: coordinate to occupant mapping, free-space rules
//! - [`piece`]: cells and rigid pieces with an optional pivot
//! - [`board`]: atomic batch movement, locking, line clears, compaction
//! - [`rotation`]: clockwise rotation with a bounded horizontal kick search
//! - [`spawn`]: shape descriptors, the piece-source boundary, spawning
//! - [`shapes`] / [`rng`]: default tetromino catalogue and a seedable source
//! - [`events`]: line-clear, game-over and occupant-release notifications
//! - [`session`]: command surface tying it all together
//!
//! # Rules
//!
//! - Every command either applies completely or changes nothing
//! - Rows at or above the board height are open space for spawning and rotating
//! - A piece that cannot move down locks; full rows it touched are cleared and
//!   everything above is compacted
//! - A spawn that overlaps locked cells ends the game
//!
//! # Example
//!
//! ```
//! use tilefall_core::{BoardEngine, Piece, Tetromino};
//! use tilefall_core::types::{Coord, Direction};
//!
//! let mut board = BoardEngine::with_size(4, 4).unwrap();
//! let mut piece = Piece::from_shape(1, &Tetromino::I.shape(), Coord::new(1, 0));
//! assert!(board.place_piece(&mut piece));
//! assert!(!board.move_piece(&mut piece, Direction::Down));
//! assert_eq!(board.lock_piece(piece), 1);
//! assert_eq!(board.grid().occupied_count(), 0);
//! ```

pub mod board;
pub mod error;
pub mod events;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod rotation;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod spawn;

pub use tilefall_types as types;

// Re-export commonly used types for convenience
pub use board::BoardEngine;
pub use error::{BoundaryError, ShapeError};
pub use events::{BoardEvent, BoardEvents, EventLog};
pub use grid::{Grid, Slot};
pub use piece::{Cell, Piece};
pub use rng::ShapeBag;
pub use rotation::{RotateOutcome, MAX_ROTATION_ATTEMPTS};
pub use session::{Session, StepOutcome};
pub use shapes::{tetrominoes, Tetromino};
pub use snapshot::{BoardSnapshot, SessionSnapshot};
pub use spawn::{PieceSource, ScriptedSource, ShapeDescriptor, SpawnCoordinator, SpawnOutcome};
