//! Driver-side game state.
//!
//! [`Game`] wraps a [`Session`] with the things the engine leaves to the driver:
//! pausing, scoring, and the automatic drop pace. It never reads the clock;
//! the caller owns the timer and asks [`Game::drop_delay`] how long to wait.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::core::{BoardEvent, EventLog, Session, SessionSnapshot, ShapeBag, StepOutcome};
use crate::highscores::HighScores;
use crate::pace::DropPace;
use crate::score::ScoreKeeper;
use crate::term::Hud;
use crate::types::GameAction;

pub struct Game {
    session: Session<ShapeBag, EventLog>,
    score: ScoreKeeper,
    pace: DropPace,
    paused: bool,
    high_scores: HighScores,
    high_scores_path: Option<PathBuf>,
}

impl Game {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let session = Session::new(config.board, ShapeBag::new(config.seed), EventLog::new())
            .map_err(|e| anyhow!("board: {e}"))?;
        let high_scores = match &config.high_scores {
            Some(path) => HighScores::load(path)?,
            None => HighScores::new(),
        };
        Ok(Self {
            session,
            score: ScoreKeeper::new(config.board.width),
            pace: DropPace::new(config.base_drop_ms, config.min_drop_ms),
            paused: false,
            high_scores,
            high_scores_path: config.high_scores.clone(),
        })
    }

    /// Spawn the first piece.
    pub fn start(&mut self) -> bool {
        let ok = self.session.start();
        self.pump_events();
        ok
    }

    /// Apply a player action. Returns true when the caller should re-arm its
    /// drop timer.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let rearm = match action {
            GameAction::Pause => {
                if !self.session.is_game_over() {
                    self.paused = !self.paused;
                    info!(paused = self.paused, "pause toggled");
                }
                false
            }
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if self.paused || self.session.is_game_over() => false,
            GameAction::MoveLeft | GameAction::MoveRight => {
                if let Some(dir) = action.direction() {
                    self.session.try_move(dir);
                }
                false
            }
            GameAction::MoveDown => {
                self.session.step_down();
                true
            }
            GameAction::Rotate => {
                let outcome = self.session.rotate();
                debug!(?outcome, "rotate");
                false
            }
        };
        self.pump_events();
        rearm
    }

    /// One automatic drop. Does nothing while paused or after game over.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.paused || self.session.is_game_over() {
            return None;
        }
        let outcome = self.session.step_down();
        self.pump_events();
        if let StepOutcome::GameOver { .. } = outcome {
            info!(
                score = self.score.score(),
                lines = self.score.lines(),
                pieces = self.session.pieces_spawned(),
                "game over"
            );
        }
        Some(outcome)
    }

    pub fn restart(&mut self) {
        self.paused = false;
        self.score.reset();
        self.pace.reset();
        self.session.restart();
    }

    /// Drain engine events into the score, pace and high scores, returning
    /// them.
    pub fn pump_events(&mut self) -> Vec<BoardEvent> {
        let events: Vec<BoardEvent> = self.session.events_mut().drain().collect();
        for event in &events {
            self.score.record(event);
            match event {
                BoardEvent::PieceSpawned { .. } => self.pace.on_spawn(),
                BoardEvent::GameOver => self.record_high_score(),
                _ => {}
            }
        }
        events
    }

    fn record_high_score(&mut self) {
        let score = self.score.score();
        if score == 0 || self.high_scores.record(score, self.score.lines()).is_none() {
            return;
        }
        let Some(path) = &self.high_scores_path else {
            return;
        };
        if let Err(e) = self.high_scores.save(path) {
            warn!(error = %format!("{e:#}"), "failed to save high scores");
        }
    }

    pub fn drop_delay(&self) -> Duration {
        self.pace.current()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    pub fn score(&self) -> &ScoreKeeper {
        &self.score
    }

    pub fn session(&self) -> &Session<ShapeBag, EventLog> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<ShapeBag, EventLog> {
        &mut self.session
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn hud(&self) -> Hud<'_> {
        Hud {
            score: self.score.score(),
            lines: self.score.lines(),
            drop_ms: self.pace.current_ms(),
            preview: self.session.preview(),
            paused: self.paused,
            best: self.high_scores.best(),
        }
    }
}
