//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond parsing/formatting, making
//! them usable in any context (simulation core, terminal rendering, tooling).
//!
//! # Board Dimensions
//!
//! Canonical playfield dimensions (configurable per game):
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Cols**: 10 (indexed 0-9, left to right)
//!
//! # Default Tuning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FALL_MS` | 500 | Fall tick interval at the start of a game |
//! | `MIN_FALL_MS` | 200 | Fall tick interval never drops below this |
//! | `SPEED_NUMERATOR` / `SPEED_DENOMINATOR` | 9/10 | Interval factor per speed level |
//! | `SPEED_SCORE_STEP` | 1000 | Score needed per speed level |
//! | `BASE_LINE_SCORE` | 100 | Points per cleared line |
//! | `COMBO_BONUS` | 10 | Points per cleared line per combo step |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, GameAction, PieceKind, Rgb, BOARD_COLS, BOARD_ROWS};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//!
//! // Parse a game action
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! // Cells are tagged, never numeric
//! let cell = Cell::Occupied(Rgb::new(255, 99, 71));
//! assert!(cell.is_occupied());
//!
//! assert_eq!(BOARD_ROWS, 20);
//! assert_eq!(BOARD_COLS, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Board height in cells (20 rows)
pub const BOARD_ROWS: u16 = 20;

/// Board width in cells (10 columns)
pub const BOARD_COLS: u16 = 10;

/// Largest width/height of any shape matrix
pub const MAX_SHAPE_DIM: usize = 4;

/// Fixed frame interval of the terminal runner in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall tick interval at the start of a game
pub const DEFAULT_FALL_MS: u32 = 500;

/// Floor for the fall tick interval
pub const MIN_FALL_MS: u32 = 200;

/// Speed factor numerator (9/10 = interval shrinks by 10% per level)
pub const SPEED_NUMERATOR: u32 = 9;

/// Speed factor denominator
pub const SPEED_DENOMINATOR: u32 = 10;

/// Cumulative score per speed level
pub const SPEED_SCORE_STEP: u64 = 1000;

/// Points per cleared line
pub const BASE_LINE_SCORE: u64 = 100;

/// Points per cleared line per step of the running combo
pub const COMBO_BONUS: u64 = 10;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex color.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#ff6347"), Some(Rgb::new(255, 99, 71)));
    /// assert_eq!(Rgb::from_hex("1abc9c"), Some(Rgb::new(26, 188, 156)));
    /// assert_eq!(Rgb::from_hex("#fff"), None);
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The seven piece kinds of the standard catalog
///
/// Each kind has a distinct shape and color:
/// - **T**: tomato `#ff6347`
/// - **O**: orange `#f39c12`
/// - **S**: green `#2ecc71`
/// - **Z**: red `#e74c3c`
/// - **L**: blue `#3498db`
/// - **J**: purple `#9b59b6`
/// - **I**: teal `#1abc9c`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// A cell on the game board
///
/// Empty cells never carry a color; occupied cells always do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Rgb),
}

impl Cell {
    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn color(&self) -> Option<Rgb> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(color) => Some(*color),
        }
    }
}

/// Player intents accepted by the engine
///
/// Every intent except `Restart` is discarded while the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; locks it when blocked
    SoftDrop,
    /// Rotate piece 90° clockwise in place (no wall kicks)
    Rotate,
    /// Drop piece to the lowest legal row and lock it
    HardDrop,
    /// Reinitialize board and score and spawn a fresh piece
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Restart => "restart",
        }
    }
}

/// Externally visible game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Playing,
    GameOver,
}
