//! Tilefall (workspace facade crate).
//!
//! Re-exports the member crates under `tilefall::{core,input,term,types}` and
//! hosts the driver-side pieces of the binary: configuration, scoring, drop
//! pacing, the high-score file, the interactive game loop state and the
//! headless replay.

pub use tilefall_core as core;
pub use tilefall_input as input;
pub use tilefall_term as term;
pub use tilefall_types as types;

pub mod config;
pub mod game;
pub mod highscores;
pub mod logging;
pub mod pace;
pub mod replay;
pub mod score;
