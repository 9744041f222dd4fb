//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] intents.
//! It knows nothing about the engine beyond the intent type, so any other
//! front end can supply its own mapping instead.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
