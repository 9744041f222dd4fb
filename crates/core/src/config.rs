//! Game configuration
//!
//! Defaults match the canonical game (20x10 board, 100/10 scoring, 500ms
//! falling to a 200ms floor). Values can be overlaid from environment
//! variables or loaded from a JSON file.
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_ROWS` / `BLOCKFALL_COLS`: board dimensions
//! - `BLOCKFALL_BASE_SCORE` / `BLOCKFALL_COMBO_BONUS`: scoring constants
//! - `BLOCKFALL_FALL_MS` / `BLOCKFALL_MIN_FALL_MS`: initial and floor interval
//! - `BLOCKFALL_SPEED_STEP`: score per speed level
//! - `BLOCKFALL_LOOKAHEAD`: "0"/"false" disables the next-piece preview
//! - `BLOCKFALL_SEED`: RNG seed
//!
//! Unparseable values fall back to the default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::ShapeCatalog;
use crate::scoring::{ScoreRules, SpeedRules};
use crate::types::{
    PieceKind, BASE_LINE_SCORE, BOARD_COLS, BOARD_ROWS, COMBO_BONUS, DEFAULT_FALL_MS,
    MAX_SHAPE_DIM, MIN_FALL_MS, SPEED_DENOMINATOR, SPEED_NUMERATOR, SPEED_SCORE_STEP,
};

/// Largest supported board side
pub const MAX_BOARD_DIM: u16 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid board dimensions {rows}x{cols} (each side must be {min}..={max})")]
    InvalidDimensions {
        rows: u16,
        cols: u16,
        min: u16,
        max: u16,
    },
    #[error("invalid speed rules: {0}")]
    InvalidSpeed(&'static str),
    #[error("piece catalog is empty")]
    EmptyCatalog,
    #[error("board is {board_rows}x{board_cols} but config expects {rows}x{cols}")]
    BoardMismatch {
        rows: u16,
        cols: u16,
        board_rows: u16,
        board_cols: u16,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: u16,
    pub cols: u16,
    pub base_score: u64,
    pub combo_bonus: u64,
    pub initial_fall_ms: u32,
    pub min_fall_ms: u32,
    pub speed_numerator: u32,
    pub speed_denominator: u32,
    pub speed_score_step: u64,
    /// Keep one pre-drawn next piece visible
    pub lookahead: bool,
    pub seed: u32,
    /// Catalog subset to draw from
    pub pieces: Vec<PieceKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            base_score: BASE_LINE_SCORE,
            combo_bonus: COMBO_BONUS,
            initial_fall_ms: DEFAULT_FALL_MS,
            min_fall_ms: MIN_FALL_MS,
            speed_numerator: SPEED_NUMERATOR,
            speed_denominator: SPEED_DENOMINATOR,
            speed_score_step: SPEED_SCORE_STEP,
            lookahead: true,
            seed: 1,
            pieces: PieceKind::ALL.to_vec(),
        }
    }
}

impl GameConfig {
    /// Defaults overlaid with `BLOCKFALL_*` environment variables
    pub fn from_env() -> Self {
        Self::default().overlay_env(|key| std::env::var(key).ok())
    }

    fn overlay_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
            value.and_then(|s| s.trim().parse().ok())
        }

        if let Some(v) = parsed(var("BLOCKFALL_ROWS")) {
            self.rows = v;
        }
        if let Some(v) = parsed(var("BLOCKFALL_COLS")) {
            self.cols = v;
        }
        if let Some(v) = parsed(var("BLOCKFALL_BASE_SCORE")) {
            self.base_score = v;
        }
        if let Some(v) = parsed(var("BLOCKFALL_COMBO_BONUS")) {
            self.combo_bonus = v;
        }
        if let Some(v) = parsed(var("BLOCKFALL_FALL_MS")) {
            self.initial_fall_ms = v;
        }
        if let Some(v) = parsed(var("BLOCKFALL_MIN_FALL_MS")) {
            self.min_fall_ms = v;
        }
        if let Some(v) = parsed(var("BLOCKFALL_SPEED_STEP")) {
            self.speed_score_step = v;
        }
        if let Some(v) = parsed(var("BLOCKFALL_SEED")) {
            self.seed = v;
        }
        if let Some(v) = var("BLOCKFALL_LOOKAHEAD") {
            match v.trim().to_lowercase().as_str() {
                "0" | "false" | "off" | "no" => self.lookahead = false,
                "1" | "true" | "on" | "yes" => self.lookahead = true,
                _ => {}
            }
        }
        self
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = MAX_SHAPE_DIM as u16;
        let dims_ok = |v: u16| (min..=MAX_BOARD_DIM).contains(&v);
        if !dims_ok(self.rows) || !dims_ok(self.cols) {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
                min,
                max: MAX_BOARD_DIM,
            });
        }
        if self.min_fall_ms == 0 {
            return Err(ConfigError::InvalidSpeed("min_fall_ms must be positive"));
        }
        if self.min_fall_ms > self.initial_fall_ms {
            return Err(ConfigError::InvalidSpeed(
                "min_fall_ms must not exceed initial_fall_ms",
            ));
        }
        if self.speed_numerator == 0 || self.speed_numerator > self.speed_denominator {
            return Err(ConfigError::InvalidSpeed(
                "speed factor must be in (0, 1]",
            ));
        }
        if self.speed_score_step == 0 {
            return Err(ConfigError::InvalidSpeed("speed_score_step must be positive"));
        }
        if self.pieces.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(())
    }

    pub fn score_rules(&self) -> ScoreRules {
        ScoreRules {
            base: self.base_score,
            bonus: self.combo_bonus,
        }
    }

    pub fn speed_rules(&self) -> SpeedRules {
        SpeedRules {
            initial_ms: self.initial_fall_ms,
            min_ms: self.min_fall_ms,
            numerator: self.speed_numerator,
            denominator: self.speed_denominator,
            score_step: self.speed_score_step,
        }
    }

    pub fn catalog(&self) -> Result<ShapeCatalog, ConfigError> {
        ShapeCatalog::from_kinds(&self.pieces).ok_or(ConfigError::EmptyCatalog)
    }
}
