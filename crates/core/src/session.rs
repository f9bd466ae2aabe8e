//! Session module - the command surface a driver talks to
//!
//! A session ties the board engine to a spawn coordinator and tracks the active
//! piece. The driver decides timing: it calls [`Session::step_down`] whenever its
//! drop timer fires and forwards player commands through [`Session::try_move`]
//! and [`Session::try_rotate`].
//!
//! ```
//! use tilefall_core::{EventLog, Session, ShapeBag};
//! use tilefall_core::types::{BoardConfig, Direction};
//!
//! let mut session = Session::new(BoardConfig::default(), ShapeBag::new(1), EventLog::new()).unwrap();
//! assert!(session.start());
//! session.try_move(Direction::Left);
//! session.try_rotate();
//! while !session.step_down().is_locked() {}
//! assert!(!session.is_game_over());
//! ```

use tracing::info;

use crate::board::BoardEngine;
use crate::events::{BoardEvents, EventLog};
use crate::piece::Piece;
use crate::rotation::RotateOutcome;
use crate::snapshot::SessionSnapshot;
use crate::spawn::{PieceSource, ShapeDescriptor, SpawnCoordinator, SpawnOutcome};
use crate::types::{BoardConfig, ConfigError, Direction};

/// Result of one downward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// The piece could not move, locked, and the next piece spawned.
    Locked { cleared: u32 },
    /// The piece locked (clearing `cleared` rows) and the next spawn was blocked,
    /// or the session was already over.
    GameOver { cleared: u32 },
}

impl StepOutcome {
    pub fn is_locked(&self) -> bool {
        !matches!(self, StepOutcome::Moved)
    }
}

pub struct Session<S, E = EventLog> {
    board: BoardEngine<E>,
    spawner: SpawnCoordinator<S>,
    active: Option<Piece>,
    started: bool,
    game_over: bool,
}

impl<S: PieceSource, E: BoardEvents> Session<S, E> {
    pub fn new(config: BoardConfig, source: S, events: E) -> Result<Self, ConfigError> {
        let board = BoardEngine::new(config, events)?;
        let spawner = SpawnCoordinator::new(source, config.spawn());
        Ok(Self {
            board,
            spawner,
            active: None,
            started: false,
            game_over: false,
        })
    }

    /// Spawn the first piece. Returns false if the session is (now) over.
    pub fn start(&mut self) -> bool {
        if !self.started {
            self.started = true;
            self.spawn();
        }
        !self.game_over
    }

    /// Empty the board and start again with the same piece source.
    pub fn restart(&mut self) -> bool {
        self.active = None;
        self.board.clear();
        self.game_over = false;
        self.started = false;
        info!("session restarted");
        self.start()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn board(&self) -> &BoardEngine<E> {
        &self.board
    }

    pub fn events(&self) -> &E {
        self.board.events()
    }

    pub fn events_mut(&mut self) -> &mut E {
        self.board.events_mut()
    }

    /// Shape staged for the next spawn.
    pub fn preview(&self) -> Option<&ShapeDescriptor> {
        self.spawner.preview()
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.spawner.spawned()
    }

    /// Translate the active piece one cell.
    ///
    /// A rejected move changes nothing, in every direction. Locking a piece
    /// that cannot fall is [`Session::step_down`]'s job.
    pub fn try_move(&mut self, dir: Direction) -> bool {
        match self.active.as_mut() {
            Some(piece) => self.board.move_piece(piece, dir),
            None => false,
        }
    }

    pub fn try_rotate(&mut self) -> bool {
        self.rotate().is_rotated()
    }

    /// Rotate the active piece, reporting kick details.
    pub fn rotate(&mut self) -> RotateOutcome {
        match self.active.as_mut() {
            Some(piece) => self.board.rotate_piece(piece),
            None => RotateOutcome::Blocked { attempts: 0 },
        }
    }

    /// Move the active piece down one row, locking it if it is blocked.
    pub fn step_down(&mut self) -> StepOutcome {
        let Some(piece) = self.active.as_mut() else {
            return StepOutcome::GameOver { cleared: 0 };
        };
        if self.board.move_piece(piece, Direction::Down) {
            return StepOutcome::Moved;
        }

        let Some(piece) = self.active.take() else {
            return StepOutcome::GameOver { cleared: 0 };
        };
        let cleared = self.board.lock_piece(piece);
        self.spawn();
        if self.game_over {
            StepOutcome::GameOver { cleared }
        } else {
            StepOutcome::Locked { cleared }
        }
    }

    fn spawn(&mut self) {
        match self.spawner.spawn_next(&mut self.board) {
            SpawnOutcome::Spawned(piece) => self.active = Some(piece),
            SpawnOutcome::Blocked => {
                self.active = None;
                self.game_over = true;
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board.snapshot(),
            active_piece: self.active.as_ref().map(|p| p.id()),
            pieces_spawned: self.spawner.spawned(),
            game_over: self.game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::BoardEvent;
    use crate::shapes::Tetromino;
    use crate::spawn::ScriptedSource;
    use crate::types::Coord;

    fn session(
        width: i32,
        height: i32,
        shapes: &[Tetromino],
    ) -> Session<ScriptedSource, Vec<BoardEvent>> {
        let source = ScriptedSource::new(shapes.iter().map(|t| t.shape()).collect());
        Session::new(BoardConfig::new(width, height), source, Vec::new()).unwrap()
    }

    #[test]
    fn commands_before_start_fail() {
        let mut s = session(10, 20, &[Tetromino::T]);
        assert!(!s.try_move(Direction::Left));
        assert!(!s.try_rotate());
        assert!(s.active().is_none());
    }

    #[test]
    fn start_spawns_at_anchor() {
        let mut s = session(10, 20, &[Tetromino::T]);
        assert!(s.start());
        let coords: Vec<Coord> = s.active().unwrap().coords().collect();
        assert_eq!(
            coords,
            vec![
                Coord::new(3, 18),
                Coord::new(4, 18),
                Coord::new(5, 18),
                Coord::new(4, 19)
            ]
        );
        assert_eq!(s.events(), &vec![BoardEvent::PieceSpawned { piece: 1 }]);
        // Starting twice does not spawn again.
        assert!(s.start());
        assert_eq!(s.pieces_spawned(), 1);
    }

    #[test]
    fn blocked_down_locks_and_spawns_next() {
        let mut s = session(10, 20, &[Tetromino::O]);
        s.start();
        let mut moved = 0;
        loop {
            match s.step_down() {
                StepOutcome::Moved => moved += 1,
                StepOutcome::Locked { cleared } => {
                    assert_eq!(cleared, 0);
                    break;
                }
                StepOutcome::GameOver { .. } => panic!("unexpected game over"),
            }
        }
        assert_eq!(moved, 18);
        assert_eq!(s.pieces_spawned(), 2);
        assert_eq!(s.active().map(|p| p.id()), Some(2));
        assert!(s.board().grid().slot(Coord::new(4, 0)).is_some_and(|slot| !slot.movable));
    }

    #[test]
    fn blocked_down_move_does_not_lock() {
        let mut s = session(6, 6, &[Tetromino::O]);
        s.start();
        while s.try_move(Direction::Down) {}
        let before = s.snapshot();
        let events = s.events().len();

        assert!(!s.try_move(Direction::Down));
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.events().len(), events);
        assert!(s.active().is_some_and(|p| p.cells().iter().all(|c| c.is_movable())));

        // The driver's step is what locks it.
        assert!(matches!(s.step_down(), StepOutcome::Locked { cleared: 0 }));
        assert_eq!(s.pieces_spawned(), 2);
    }

    #[test]
    fn restart_clears_board_and_flags() {
        let mut s = session(4, 2, &[Tetromino::O]);
        s.start();
        // The O fills columns 1..=2 of both rows; the second O cannot spawn.
        assert!(matches!(s.step_down(), StepOutcome::GameOver { cleared: 0 }));
        assert!(s.is_game_over());
        assert!(!s.try_move(Direction::Down));

        assert!(s.restart());
        assert!(!s.is_game_over());
        assert_eq!(s.board().grid().occupied_count(), 4);
        assert!(s.active().is_some());
    }
}
