use serde::Serialize;

use crate::catalog::CatalogEntry;
use crate::piece::ActivePiece;
use crate::shape::Shape;
use crate::types::{Cell, Phase, PieceKind, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Rgb,
    pub row: i32,
    pub col: i32,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            color: value.color,
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Rgb,
}

impl From<CatalogEntry> for NextSnapshot {
    fn from(value: CatalogEntry) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            color: value.color,
        }
    }
}

/// Read-only view of the game after a completed mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub rows: u16,
    pub cols: u16,
    /// Row-major locked cells
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i32>,
    pub next: Option<NextSnapshot>,
    pub score: u64,
    pub combo: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
    pub phase: Phase,
    pub episode_id: u32,
}

impl GameSnapshot {
    /// Locked cell at (row, col); `None` outside the grid
    pub fn cell(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 || row >= self.rows as i32 || col >= self.cols as i32 {
            return None;
        }
        self.cells
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
            active: None,
            ghost_row: None,
            next: None,
            score: 0,
            combo: 0,
            lines: 0,
            fall_interval_ms: 0,
            phase: Phase::Playing,
            episode_id: 0,
        }
    }
}
