//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Timing (drop
//! delay, repeat cadence) belongs to the driver, not to this crate.

pub mod map;

pub use tilefall_types as types;

pub use map::{handle_key_event, is_actionable, should_quit};
