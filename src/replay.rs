//! Headless replay: plays a seeded random command stream without a terminal
//! and writes one JSON object per line.
//!
//! Output lines, in order:
//!
//! - one `{"step": N, "action": "...", "ok": bool, "events": [...]}` per command
//! - one `{"snapshot": {...}}` with the final session state
//! - one `{"score": N, "lines": N, "pieces": N, "gameOver": bool}` summary
//!
//! The same seed and step count always produce byte-identical output.

use std::io::Write;

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::core::{BoardEvent, SessionSnapshot, StepOutcome};
use crate::game::Game;
use crate::types::GameAction;

/// Decorrelates the command stream from the piece stream of the same seed.
const COMMAND_SEED_SALT: u64 = 0x5EED_C0DE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplayCommand {
    Action(GameAction),
    /// An automatic drop from the timer.
    Tick,
}

impl ReplayCommand {
    fn as_str(&self) -> &'static str {
        match self {
            ReplayCommand::Action(action) => action.as_str(),
            ReplayCommand::Tick => "tick",
        }
    }

    /// Weighted toward drops so games actually progress.
    fn pick(rng: &mut ChaCha8Rng) -> Self {
        match rng.gen_range(0..10) {
            0 | 1 => ReplayCommand::Action(GameAction::MoveLeft),
            2 | 3 => ReplayCommand::Action(GameAction::MoveRight),
            4 | 5 => ReplayCommand::Action(GameAction::Rotate),
            6 => ReplayCommand::Action(GameAction::MoveDown),
            _ => ReplayCommand::Tick,
        }
    }
}

#[derive(Serialize)]
struct StepLine<'a> {
    step: u32,
    action: &'static str,
    ok: bool,
    events: &'a [BoardEvent],
}

#[derive(Serialize)]
struct SnapshotLine<'a> {
    snapshot: &'a SessionSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub steps: u32,
    pub score: u64,
    pub lines: u32,
    pub pieces: u32,
    pub game_over: bool,
}

/// Run `steps` commands (or until game over) and write the transcript to `out`.
///
/// The high-score file is neither read nor written.
pub fn run<W: Write>(config: &AppConfig, steps: u32, mut out: W) -> Result<ReplaySummary> {
    let mut game = Game::new(&AppConfig {
        high_scores: None,
        ..config.clone()
    })?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed ^ COMMAND_SEED_SALT);
    info!(seed = config.seed, steps, "replay started");

    game.session_mut().start();
    let mut events = game.pump_events();
    let mut executed = 0;

    for step in 0..steps {
        if game.is_game_over() {
            break;
        }
        let command = ReplayCommand::pick(&mut rng);
        let ok = match command {
            ReplayCommand::Tick => game.tick() == Some(StepOutcome::Moved),
            ReplayCommand::Action(GameAction::Rotate) => game.session_mut().try_rotate(),
            ReplayCommand::Action(action) => match action.direction() {
                Some(dir) => game.session_mut().try_move(dir),
                None => game.apply(action),
            },
        };
        events.extend(game.pump_events());

        let line = StepLine {
            step,
            action: command.as_str(),
            ok,
            events: &events,
        };
        write_line(&mut out, &line)?;
        events.clear();
        executed = step + 1;
    }

    let snapshot = game.snapshot();
    write_line(&mut out, &SnapshotLine { snapshot: &snapshot })?;

    let summary = ReplaySummary {
        steps: executed,
        score: game.score().score(),
        lines: game.score().lines(),
        pieces: game.session().pieces_spawned(),
        game_over: game.is_game_over(),
    };
    write_line(&mut out, &summary)?;
    out.flush().context("failed to flush replay output")?;

    info!(
        steps = summary.steps,
        score = summary.score,
        lines = summary.lines,
        game_over = summary.game_over,
        "replay finished"
    );
    Ok(summary)
}

fn write_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("failed to encode replay line")?;
    out.write_all(b"\n").context("failed to write replay line")?;
    Ok(())
}
