//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the whole board/piece simulation: collision model,
//! movement and rotation legality, line clears and scoring, speed
//! progression, and the piece lifecycle. It has **zero dependencies** on
//! terminals, input devices or I/O (configuration files aside), making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Every rule is a small function or method with unit tests
//! - **Portable**: Any adapter can drive it (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`shape`]: Immutable 0/1 shape matrices and clockwise rotation
//! - [`catalog`]: The fixed set of shape/color pairs and uniform selection
//! - [`rng`]: Seeded LCG and the piece queue with one-piece lookahead
//! - [`board`]: Fixed-size grid, the collision predicate, lock and line clear
//! - [`piece`]: The active piece and its move/rotate/drop attempts
//! - [`scoring`]: Line-clear points, combo streak and speed progression
//! - [`timer`]: Cancellable, reschedulable fall timer
//! - [`config`]: Game configuration (env/JSON) and validation
//! - [`engine`]: The lifecycle state machine tying everything together
//! - [`snapshot`]: Read-only state for renderers
//!
//! # Game Rules
//!
//! - **Collision**: A placement is illegal if any filled cell is left of
//!   column 0, right of the last column, below the last row, or on a
//!   locked cell. Cells above the top row never collide with anything.
//! - **Rotation**: 90° clockwise about the bounding-box origin; no wall kicks
//! - **Spawn**: Row 0, horizontally centered (biased left)
//! - **Scoring**: `base * n + bonus * n * combo` per clearing lock
//! - **Game over**: A freshly spawned piece collides where it spawns
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Engine, GameConfig};
//! use blockfall_types::{GameAction, Phase};
//!
//! let mut game = Engine::new(GameConfig::default()).unwrap();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.phase(), Phase::Playing);
//! assert!(game.board().occupied_count() > 0);
//! ```
//!
//! # Timing
//!
//! The engine never reads a clock. Either feed it elapsed time with
//! [`Engine::advance`](engine::Engine::advance), or register the current
//! [`TimerHandle`] with an external scheduler and report fires through
//! [`Engine::on_timer`](engine::Engine::on_timer).

pub mod board;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;
pub mod timer;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{CatalogEntry, ShapeCatalog};
pub use config::{ConfigError, GameConfig};
pub use engine::{Engine, LockEvent};
pub use piece::ActivePiece;
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{line_clear_points, ClearOutcome, ScoreRules, ScoreState, SpeedRules};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
pub use timer::{FallTimer, TimerHandle};
