//! Session and spawn tests.

use tilefall::core::{
    BoardEvent, PieceSource, ScriptedSource, Session, ShapeBag, ShapeDescriptor, SpawnCoordinator,
    SpawnOutcome, StepOutcome, Tetromino,
};
use tilefall::core::{BoardEngine, EventLog, Slot};
use tilefall::types::{BoardConfig, Coord, Direction, OccupantId};

fn scripted(shapes: &[Tetromino]) -> ScriptedSource {
    ScriptedSource::new(shapes.iter().map(|t| t.shape()).collect())
}

#[test]
fn blocked_spawn_reports_game_over_without_touching_the_grid() {
    let mut board = BoardEngine::new(BoardConfig::new(10, 20), Vec::new()).unwrap();
    board
        .set_occupant(Coord::new(4, 18), Some(Slot::locked(OccupantId::new(50, 0))))
        .unwrap();
    let before = board.snapshot();

    let mut spawner = SpawnCoordinator::new(scripted(&[Tetromino::T]), Coord::new(4, 18));
    assert_eq!(spawner.spawn_next(&mut board), SpawnOutcome::Blocked);
    assert_eq!(board.snapshot(), before);
    assert_eq!(board.events(), &vec![BoardEvent::GameOver]);
    assert_eq!(spawner.spawned(), 0);
}

#[test]
fn piece_ids_only_advance_on_successful_spawns() {
    let mut board = BoardEngine::new(BoardConfig::new(10, 20), Vec::new()).unwrap();
    let mut spawner = SpawnCoordinator::new(scripted(&[Tetromino::O]), Coord::new(0, 0));
    let SpawnOutcome::Spawned(first) = spawner.spawn_next(&mut board) else {
        panic!("first spawn should succeed");
    };
    assert_eq!(first.id(), 1);
    // Same anchor, now occupied by locked cells.
    board.lock_piece(first);
    assert_eq!(spawner.spawn_next(&mut board), SpawnOutcome::Blocked);
    assert_eq!(spawner.spawned(), 1);
}

#[test]
fn custom_shapes_spawn_relative_to_the_anchor() {
    let shape = ShapeDescriptor::new(
        vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1)],
        Some(Coord::new(0, 0)),
    )
    .unwrap();
    let source = ScriptedSource::new(vec![shape]);
    let config = BoardConfig::new(6, 8).with_spawn(Coord::new(2, 5));
    let mut session = Session::new(config, source, Vec::new()).unwrap();
    assert!(session.start());

    let coords: Vec<Coord> = session.active().unwrap().coords().collect();
    assert_eq!(coords, vec![Coord::new(2, 5), Coord::new(3, 5), Coord::new(2, 6)]);
    assert!(session.try_rotate());
}

#[test]
fn session_clears_a_row_built_from_two_pieces() {
    // Two O pieces fill a 4-wide board's bottom two rows.
    let mut session = Session::new(BoardConfig::new(4, 6), scripted(&[Tetromino::O]), Vec::new())
        .unwrap();
    assert!(session.start());

    // First O spawns at columns 1..=2; push it to the left wall and drop it.
    assert!(session.try_move(Direction::Left));
    assert!(!session.try_move(Direction::Left));
    while session.step_down() == StepOutcome::Moved {}

    // Second O goes to the right wall.
    assert!(session.try_move(Direction::Right));
    assert!(!session.try_move(Direction::Right));
    let mut outcome = session.step_down();
    while outcome == StepOutcome::Moved {
        outcome = session.step_down();
    }
    assert_eq!(outcome, StepOutcome::Locked { cleared: 2 });
    // Only the third piece remains on the board.
    assert_eq!(session.board().grid().occupied_count(), 4);
    assert!(session
        .events()
        .contains(&BoardEvent::LinesCleared { count: 2 }));
}

#[test]
fn failed_moves_leave_free_space_untouched() {
    let mut session = Session::new(BoardConfig::new(4, 6), scripted(&[Tetromino::O]), Vec::new())
        .unwrap();
    assert!(session.start());
    while session.try_move(Direction::Left) {}
    while session.try_move(Direction::Down) {}

    let free = |s: &Session<ScriptedSource, Vec<BoardEvent>>| -> Vec<bool> {
        (-1..8)
            .flat_map(|y| (-1..5).map(move |x| Coord::new(x, y)))
            .map(|c| s.board().is_free(c))
            .collect()
    };
    let before = free(&session);
    let events = session.events().len();

    for dir in [Direction::Left, Direction::Down, Direction::Left, Direction::Down] {
        assert!(!session.try_move(dir), "{dir:?} should be blocked");
        assert_eq!(free(&session), before);
    }
    assert_eq!(session.events().len(), events);
    assert_eq!(session.active().unwrap().id(), 1);
}

#[test]
fn stacking_to_the_top_ends_the_game() {
    let mut session = Session::new(BoardConfig::new(6, 6), scripted(&[Tetromino::O]), Vec::new())
        .unwrap();
    assert!(session.start());
    let mut last = StepOutcome::Moved;
    for _ in 0..100 {
        last = session.step_down();
        if let StepOutcome::GameOver { .. } = last {
            break;
        }
    }
    assert!(matches!(last, StepOutcome::GameOver { cleared: 0 }));
    assert!(session.is_game_over());
    assert!(session.active().is_none());
    assert_eq!(session.events().last(), Some(&BoardEvent::GameOver));

    // Commands after game over are rejected.
    assert!(!session.try_move(Direction::Left));
    assert!(!session.try_rotate());
    assert!(matches!(session.step_down(), StepOutcome::GameOver { .. }));
}

#[test]
fn snapshot_reports_active_piece_and_counts() {
    let mut session = Session::new(BoardConfig::default(), ShapeBag::new(3), EventLog::new()).unwrap();
    let before = session.snapshot();
    assert_eq!(before.active_piece, None);
    assert_eq!(before.pieces_spawned, 0);

    session.start();
    let snap = session.snapshot();
    assert_eq!(snap.active_piece, Some(1));
    assert_eq!(snap.pieces_spawned, 1);
    assert!(!snap.game_over);
    assert_eq!(snap.board.slots.iter().flatten().filter(|s| s.movable).count(), 4);
}

#[test]
fn preview_matches_the_next_spawn() {
    let config = BoardConfig::default();
    let mut session = Session::new(config, ShapeBag::new(11), EventLog::new()).unwrap();
    session.start();
    for _ in 0..10 {
        let preview = session.preview().cloned().unwrap();
        while !session.step_down().is_locked() {}
        if session.is_game_over() {
            break;
        }
        let offsets: Vec<Coord> = session
            .active()
            .unwrap()
            .coords()
            .map(|c| c - config.spawn())
            .collect();
        assert_eq!(offsets, preview.offsets());
    }
}

#[test]
fn shape_bag_peek_and_next_agree() {
    let mut a = ShapeBag::new(7);
    let mut b = ShapeBag::new(7);
    for _ in 0..20 {
        let peeked = a.peek_shape().cloned();
        let next = a.next_shape();
        assert_eq!(peeked.as_ref(), Some(&next));
        assert_eq!(next, b.next_shape());
    }
}
