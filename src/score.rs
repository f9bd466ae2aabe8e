//! Score keeping for the driver.
//!
//! A clear of `n` rows at once is worth `width * n * n` points.

use tilefall_core::{BoardEvent, BoardEvents};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreKeeper {
    width: u32,
    score: u64,
    lines: u32,
    games_over: u32,
}

impl ScoreKeeper {
    pub fn new(width: i32) -> Self {
        Self {
            width: width.max(0) as u32,
            score: 0,
            lines: 0,
            games_over: 0,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn games_over(&self) -> u32 {
        self.games_over
    }

    /// Points awarded for clearing `count` rows in one lock.
    pub fn points_for(&self, count: u32) -> u64 {
        let n = u64::from(count);
        u64::from(self.width) * n * n
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.lines = 0;
    }

    pub fn record(&mut self, event: &BoardEvent) {
        match *event {
            BoardEvent::LinesCleared { count } => self.on_line_cleared(count),
            BoardEvent::GameOver => self.on_game_over(),
            BoardEvent::PieceSpawned { .. } | BoardEvent::OccupantReleased { .. } => {}
        }
    }
}

impl BoardEvents for ScoreKeeper {
    fn on_line_cleared(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        let points = self.points_for(count);
        self.score += points;
        self.lines += count;
        debug!(count, points, score = self.score, "lines cleared");
    }

    fn on_game_over(&mut self) {
        self.games_over += 1;
    }
}
