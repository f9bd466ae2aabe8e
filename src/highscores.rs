//! Best scores kept across runs, stored as a small JSON file.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Entries kept on file.
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u64,
    pub lines: u32,
}

/// Best-first list of finished games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<HighScore>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the list at `path`. A missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read high scores {}", path.display()))
            }
        };
        let mut scores: HighScores = serde_json::from_str(&text)
            .with_context(|| format!("invalid high scores file {}", path.display()))?;
        scores.normalize();
        Ok(scores)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write high scores {}", path.display()))
    }

    /// Insert a finished game. Returns its rank (0 is best) when it made the
    /// list. Zero scores are never recorded.
    pub fn record(&mut self, score: u64, lines: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }
        // Ties rank below earlier games.
        let rank = self.entries.partition_point(|e| e.score >= score);
        if rank >= MAX_ENTRIES {
            return None;
        }
        self.entries.insert(rank, HighScore { score, lines });
        self.entries.truncate(MAX_ENTRIES);
        debug!(score, lines, rank, "high score recorded");
        Some(rank)
    }

    pub fn best(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    fn normalize(&mut self) {
        self.entries.retain(|e| e.score > 0);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }
}
