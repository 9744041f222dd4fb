//! Terminal rendering for the game.
//!
//! A small, game-oriented rendering layer: the pure [`GameView`] paints a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`] of styled
//! glyphs, and the [`TerminalRenderer`] flushes framebuffers to a crossterm
//! backend, redrawing only rows that changed.
//!
//! Goals:
//! - Keep `core` free of any rendering concern
//! - Make rendering unit-testable without a terminal
//! - Allow precise control over aspect ratio (2 chars wide per board cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_rows_into, TerminalRenderer};
