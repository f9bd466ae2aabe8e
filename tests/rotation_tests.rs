//! Rotation and kick search tests.

use std::collections::BTreeSet;

use tilefall::core::{BoardEngine, Piece, RotateOutcome, Slot, Tetromino, MAX_ROTATION_ATTEMPTS};
use tilefall::types::{Coord, Direction, OccupantId};

fn coord_set(piece: &Piece) -> BTreeSet<Coord> {
    piece.coords().collect()
}

fn row_set(xs: impl IntoIterator<Item = i32>, y: i32) -> BTreeSet<Coord> {
    xs.into_iter().map(|x| Coord::new(x, y)).collect()
}

fn block(board: &mut BoardEngine, c: Coord) {
    board
        .set_occupant(c, Some(Slot::locked(OccupantId::new(99, 0))))
        .unwrap();
}

/// A vertical I with its pivot at `(x, 10)`, cells at rows 8..=11.
fn vertical_i(board: &mut BoardEngine, x: i32) -> Piece {
    let mut piece = Piece::from_shape(1, &Tetromino::I.shape(), Coord::new(4, 10));
    assert!(board.place_piece(&mut piece));
    assert!(board.rotate_piece(&mut piece).is_rotated());
    let dir = if x < 4 { Direction::Left } else { Direction::Right };
    for _ in 0..(x - 4).abs() {
        assert!(board.move_piece(&mut piece, dir));
    }
    assert_eq!(piece.pivot().unwrap().coord(), Coord::new(x, 10));
    piece
}

#[test]
fn free_rotation_turns_clockwise_about_the_pivot() {
    let mut board = BoardEngine::with_size(10, 20).unwrap();
    let mut piece = Piece::from_shape(1, &Tetromino::T.shape(), Coord::new(4, 10));
    assert!(board.place_piece(&mut piece));

    let outcome = board.rotate_piece(&mut piece);
    assert_eq!(outcome, RotateOutcome::Rotated { kick: 0, attempts: 1 });
    // The stem pointed up; it now points right.
    let expected: BTreeSet<Coord> =
        [(4, 11), (4, 10), (4, 9), (5, 10)].into_iter().map(Coord::from).collect();
    assert_eq!(coord_set(&piece), expected);
    assert_eq!(board.grid().occupied_count(), 4);
}

#[test]
fn four_rotations_restore_the_piece() {
    let mut board = BoardEngine::with_size(10, 20).unwrap();
    let mut piece = Piece::from_shape(1, &Tetromino::L.shape(), Coord::new(4, 10));
    assert!(board.place_piece(&mut piece));
    let start = coord_set(&piece);
    for _ in 0..4 {
        assert!(board.rotate_piece(&mut piece).is_rotated());
    }
    assert_eq!(coord_set(&piece), start);
}

#[test]
fn kick_off_the_left_wall() {
    let mut board = BoardEngine::with_size(10, 20).unwrap();
    let mut piece = vertical_i(&mut board, 0);

    let outcome = board.rotate_piece(&mut piece);
    assert_eq!(outcome, RotateOutcome::Rotated { kick: 2, attempts: 3 });
    assert_eq!(coord_set(&piece), row_set(0..4, 10));
}

#[test]
fn kick_off_the_right_wall() {
    let mut board = BoardEngine::with_size(10, 20).unwrap();
    let mut piece = vertical_i(&mut board, 9);

    let outcome = board.rotate_piece(&mut piece);
    assert_eq!(outcome, RotateOutcome::Rotated { kick: -1, attempts: 2 });
    assert_eq!(coord_set(&piece), row_set(6..10, 10));
}

#[test]
fn blocked_on_both_sides_fails_immediately() {
    let mut board = BoardEngine::with_size(10, 20).unwrap();
    let mut piece = vertical_i(&mut board, 5);
    block(&mut board, Coord::new(3, 10));
    block(&mut board, Coord::new(6, 10));
    let before = board.snapshot();

    assert_eq!(board.rotate_piece(&mut piece), RotateOutcome::Blocked { attempts: 1 });
    assert_eq!(board.snapshot(), before);
    assert_eq!(piece.pivot().unwrap().coord(), Coord::new(5, 10));
}

#[test]
fn blocked_opposite_to_an_earlier_kick_fails() {
    let mut board = BoardEngine::with_size(10, 20).unwrap();
    let mut piece = vertical_i(&mut board, 5);
    // Right side blocked first, so the kick goes left and runs into (2, 10).
    block(&mut board, Coord::new(6, 10));
    block(&mut board, Coord::new(2, 10));

    assert_eq!(board.rotate_piece(&mut piece), RotateOutcome::Blocked { attempts: 2 });
}

#[test]
fn kick_search_stops_after_the_attempt_limit() {
    let mut board = BoardEngine::with_size(10, 20).unwrap();
    // Horizontal I, pivot (5, 10): the rotated target is a column, shifted right
    // on every blocked attempt.
    let mut piece = Piece::from_shape(1, &Tetromino::I.shape(), Coord::new(5, 10));
    assert!(board.place_piece(&mut piece));
    for x in 5..5 + i32::from(MAX_ROTATION_ATTEMPTS) {
        block(&mut board, Coord::new(x, 9));
    }
    let before = coord_set(&piece);

    let outcome = board.rotate_piece(&mut piece);
    assert_eq!(
        outcome,
        RotateOutcome::Blocked {
            attempts: MAX_ROTATION_ATTEMPTS
        }
    );
    assert_eq!(coord_set(&piece), before);
}

#[test]
fn unpivoted_piece_never_rotates() {
    let mut board = BoardEngine::with_size(10, 20).unwrap();
    let mut piece = Piece::from_shape(1, &Tetromino::O.shape(), Coord::new(4, 10));
    assert!(board.place_piece(&mut piece));
    let before = coord_set(&piece);
    assert_eq!(board.rotate_piece(&mut piece), RotateOutcome::NoPivot);
    assert_eq!(coord_set(&piece), before);
}

#[test]
fn rotation_may_reach_into_the_open_strip() {
    let mut board = BoardEngine::with_size(10, 4).unwrap();
    let mut piece = Piece::from_shape(1, &Tetromino::I.shape(), Coord::new(4, 3));
    assert!(board.place_piece(&mut piece));
    // Cells at rows 4 and 3..=1 after turning; row 4 is above the board.
    assert!(board.rotate_piece(&mut piece).is_rotated());
    assert!(piece.coords().any(|c| c.y == 4));
    assert_eq!(board.grid().occupied_count(), 3);
}
