//! Property tests for the session command surface.
//!
//! Random command streams over random seeds must keep these invariants:
//!
//! - every occupied slot is either locked or belongs to the active piece
//! - the active piece's cells are exactly the movable slots (plus any cells in
//!   the open strip above the board)
//! - a rejected move or rotation leaves the board untouched and emits nothing,
//!   including a blocked move down
//! - a rotation never takes more than the attempt limit
//! - no full row survives a lock
use proptest::prelude::*;
use tilefall::core::{
    EventLog, RotateOutcome, Session, ShapeBag, StepOutcome, MAX_ROTATION_ATTEMPTS,
};
use tilefall::types::{BoardConfig, Coord, Direction};

#[derive(Debug, Clone, Copy)]
enum Cmd {
    Left,
    Right,
    Down,
    Rotate,
    /// Timer-driven step that locks when blocked.
    Step,
}

fn cmd_strategy() -> impl Strategy<Value = Cmd> {
    prop_oneof![
        Just(Cmd::Left),
        Just(Cmd::Right),
        Just(Cmd::Down),
        Just(Cmd::Rotate),
        Just(Cmd::Step),
    ]
}

fn assert_active_matches_grid(session: &Session<ShapeBag, EventLog>) {
    let grid = session.board().grid();
    let movable: Vec<Coord> = grid
        .occupied()
        .filter(|(_, slot)| slot.movable)
        .map(|(c, _)| c)
        .collect();
    match session.active() {
        Some(piece) => {
            let mut stored: Vec<Coord> = piece.coords().filter(|&c| grid.contains(c)).collect();
            stored.sort_by_key(|c| (c.y, c.x));
            assert_eq!(stored, movable);
            for cell in piece.cells() {
                if grid.contains(cell.coord()) {
                    assert_eq!(grid.occupant_at(cell.coord()), Some(cell.occupant()));
                }
            }
        }
        None => assert!(movable.is_empty()),
    }
}

fn assert_no_full_rows(session: &Session<ShapeBag, EventLog>) {
    let grid = session.board().grid();
    for y in 0..grid.height() {
        assert!(!grid.is_row_full(y), "row {y} left full");
    }
}

proptest! {
    #[test]
    fn random_commands_keep_board_consistent(
        seed in any::<u64>(),
        width in 4i32..12,
        height in 4i32..16,
        cmds in prop::collection::vec(cmd_strategy(), 1..300),
    ) {
        let config = BoardConfig::new(width, height);
        let mut session = Session::new(config, ShapeBag::new(seed), EventLog::new()).unwrap();
        session.start();
        session.events_mut().drain().for_each(drop);

        for cmd in cmds {
            if session.is_game_over() {
                break;
            }
            let before = session.board().snapshot();
            match cmd {
                Cmd::Left | Cmd::Right | Cmd::Down => {
                    let dir = match cmd {
                        Cmd::Left => Direction::Left,
                        Cmd::Right => Direction::Right,
                        _ => Direction::Down,
                    };
                    let active = session.active().map(|p| p.id());
                    if !session.try_move(dir) {
                        prop_assert_eq!(session.board().snapshot(), before);
                        prop_assert!(session.events().is_empty());
                    }
                    prop_assert_eq!(session.active().map(|p| p.id()), active);
                }
                Cmd::Rotate => {
                    let outcome = session.rotate();
                    prop_assert!(outcome.attempts() <= MAX_ROTATION_ATTEMPTS);
                    if !outcome.is_rotated() {
                        prop_assert_eq!(session.board().snapshot(), before);
                    }
                    if let RotateOutcome::Rotated { kick, .. } = outcome {
                        prop_assert!(kick.abs() < i32::from(MAX_ROTATION_ATTEMPTS));
                    }
                }
                Cmd::Step => {
                    if let StepOutcome::Locked { .. } | StepOutcome::GameOver { .. } = session.step_down() {
                        assert_no_full_rows(&session);
                    }
                }
            }
            assert_active_matches_grid(&session);
            session.events_mut().drain().for_each(drop);
        }
    }

    #[test]
    fn same_seed_same_game(seed in any::<u64>(), drops in 1usize..200) {
        let run = |seed: u64| {
            let mut session =
                Session::new(BoardConfig::default(), ShapeBag::new(seed), EventLog::new()).unwrap();
            session.start();
            for _ in 0..drops {
                session.step_down();
            }
            session.snapshot()
        };
        prop_assert_eq!(run(seed), run(seed));
    }
}
