//! Application configuration and command-line parsing.
//!
//! Settings come from an optional JSON file (`--config PATH` or
//! `TILEFALL_CONFIG`), then environment overrides, then flags:
//!
//! - `TILEFALL_SEED`: piece sequence seed
//! - `TILEFALL_LOG`: tracing filter (read by [`crate::logging`])
//!
//! ```text
//! tilefall [--config PATH] [--seed N]
//! tilefall replay [--config PATH] [--seed N] [--steps N]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::core::rng::DEFAULT_SEED;
use crate::types::{BoardConfig, DEFAULT_BASE_DROP_MS, DEFAULT_MIN_DROP_MS};

pub const CONFIG_ENV: &str = "TILEFALL_CONFIG";
pub const SEED_ENV: &str = "TILEFALL_SEED";

/// Number of replay steps when `--steps` is not given.
pub const DEFAULT_REPLAY_STEPS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub seed: u64,
    /// Automatic drop delay for the first piece.
    pub base_drop_ms: u64,
    /// Delay the pace converges on.
    pub min_drop_ms: u64,
    /// Where tracing output goes; interactive play logs nowhere without it.
    pub log_file: Option<PathBuf>,
    /// JSON file holding the best scores. Scores are kept in memory only
    /// without it.
    pub high_scores: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            seed: DEFAULT_SEED,
            base_drop_ms: DEFAULT_BASE_DROP_MS,
            min_drop_ms: DEFAULT_MIN_DROP_MS,
            log_file: None,
            high_scores: None,
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(text).context("invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.board.validate().map_err(|e| anyhow!("board: {e}"))?;
        if self.base_drop_ms == 0 || self.min_drop_ms == 0 {
            return Err(anyhow!("drop delays must be positive"));
        }
        if self.min_drop_ms > self.base_drop_ms {
            return Err(anyhow!(
                "min_drop_ms ({}) exceeds base_drop_ms ({})",
                self.min_drop_ms,
                self.base_drop_ms
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play(AppConfig),
    Replay { config: AppConfig, steps: u32 },
}

/// Parse arguments (without the program name), reading the environment for
/// defaults through `env`.
pub fn parse_args_with_env(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Command> {
    let mut rest = args;
    let replay = rest.first().map(|a| a == "replay").unwrap_or(false);
    if replay {
        rest = &rest[1..];
    }

    let mut config_path: Option<PathBuf> = env(CONFIG_ENV).map(PathBuf::from);
    let mut seed: Option<u64> = match env(SEED_ENV) {
        Some(v) => Some(parse_seed(&v).with_context(|| format!("{SEED_ENV}"))?),
        None => None,
    };
    let mut steps = DEFAULT_REPLAY_STEPS;

    let mut i = 0usize;
    while i < rest.len() {
        match rest[i].as_str() {
            "--config" => {
                i += 1;
                let v = rest
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                config_path = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = rest.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                seed = Some(parse_seed(v)?);
            }
            "--steps" if replay => {
                i += 1;
                let v = rest
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --steps"))?;
                steps = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --steps value: {}", v))?;
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    Ok(if replay {
        Command::Replay { config, steps }
    } else {
        Command::Play(config)
    })
}

pub fn parse_args(args: &[String]) -> Result<Command> {
    parse_args_with_env(args, |key| std::env::var(key).ok())
}

fn parse_seed(v: &str) -> Result<u64> {
    v.trim()
        .parse::<u64>()
        .map_err(|_| anyhow!("invalid seed value: {}", v))
}
