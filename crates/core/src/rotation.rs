//! Rotation with horizontal kick search
//!
//! A piece turns 90° clockwise about its pivot cell. When some rotated cells are
//! blocked, the whole target is shifted one column away from the blocked side
//! and tried again:
//!
//! - blocked cells on both sides of the pivot column fail the rotation
//! - blocked cells on the side opposite to an earlier kick fail the rotation
//! - at most [`MAX_ROTATION_ATTEMPTS`] targets are tried
//!
//! A failed rotation leaves the piece and the grid untouched.

use tracing::trace;

use crate::board::BoardEngine;
use crate::events::BoardEvents;
use crate::piece::Piece;
use crate::types::Coord;

/// Initial target plus at most two kicks in one direction.
pub const MAX_ROTATION_ATTEMPTS: u8 = 3;

/// Result of [`BoardEngine::rotate_piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    /// Rotated, shifted horizontally by `kick` columns (negative is left).
    Rotated { kick: i32, attempts: u8 },
    Blocked { attempts: u8 },
    /// The piece has no pivot and never rotates.
    NoPivot,
}

impl RotateOutcome {
    pub fn is_rotated(&self) -> bool {
        matches!(self, RotateOutcome::Rotated { .. })
    }

    pub fn attempts(&self) -> u8 {
        match *self {
            RotateOutcome::Rotated { attempts, .. } | RotateOutcome::Blocked { attempts } => {
                attempts
            }
            RotateOutcome::NoPivot => 0,
        }
    }
}

/// Side of the pivot column on which blocked targets were seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KickSide {
    None,
    Right,
    Left,
}

/// Target of `cell` turned clockwise about `center`, then shifted by `shift` columns.
#[inline]
pub fn rotated_target(center: Coord, shift: i32, cell: Coord) -> Coord {
    center + Coord::new(shift, 0) + (cell - center).rotate_cw()
}

impl<E: BoardEvents> BoardEngine<E> {
    pub fn rotate_piece(&mut self, piece: &mut Piece) -> RotateOutcome {
        let Some(center) = piece.pivot().map(|cell| cell.coord()) else {
            return RotateOutcome::NoPivot;
        };

        let mut shift = 0i32;
        let mut side = KickSide::None;

        for attempt in 1..=MAX_ROTATION_ATTEMPTS {
            let targets: Vec<Coord> = piece
                .coords()
                .map(|c| rotated_target(center, shift, c))
                .collect();

            let blocked: Vec<Coord> = targets
                .iter()
                .copied()
                .filter(|&t| !self.is_free(t))
                .collect();
            if blocked.is_empty() {
                self.relocate_all(piece.cells_mut(), &targets);
                trace!(piece = piece.id(), kick = shift, attempt, "rotated");
                return RotateOutcome::Rotated {
                    kick: shift,
                    attempts: attempt,
                };
            }

            for target in blocked {
                let hit = if target.x > center.x + shift {
                    KickSide::Right
                } else {
                    KickSide::Left
                };
                match (side, hit) {
                    (KickSide::Right, KickSide::Left) | (KickSide::Left, KickSide::Right) => {
                        trace!(piece = piece.id(), attempt, "rotation blocked on both sides");
                        return RotateOutcome::Blocked { attempts: attempt };
                    }
                    _ => side = hit,
                }
            }

            match side {
                KickSide::Right => shift -= 1,
                KickSide::Left => shift += 1,
                KickSide::None => {}
            }
        }

        trace!(piece = piece.id(), "rotation kicks exhausted");
        RotateOutcome::Blocked {
            attempts: MAX_ROTATION_ATTEMPTS,
        }
    }
}
