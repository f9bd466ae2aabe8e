//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play: the board view draws a session
//! snapshot into a framebuffer, and the renderer flushes framebuffers to the
//! terminal with crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tilefall_core as core;
pub use tilefall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{occupant_color, BoardView, Hud, Viewport};
pub use renderer::{changed_runs, encode_frame_into, TerminalRenderer};
