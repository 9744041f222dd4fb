//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid (20x10 canonical) where each cell is
//! either empty or occupied by a color. Dimensions are fixed at construction.
//! Uses a flat row-major vector for cache locality.
//! Coordinates: (row, col) where row grows downward from 0 and col grows to
//! the right from 0. Rows above the grid (row < 0) exist only transiently
//! during collision checks and are never occupied.

use crate::shape::Shape;
use crate::types::{Cell, Rgb, BOARD_COLS, BOARD_ROWS};

/// The game board - flat storage of `rows * cols` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u16,
    cols: u16,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows as usize * cols as usize],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.rows as i32 || col >= self.cols as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Get cell at (row, col); `None` outside the grid
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Column inside the grid and row not below the bottom.
    ///
    /// Rows above the top are in bounds: spawn checks may reach them.
    pub fn is_in_bounds(&self, row: i32, col: i32) -> bool {
        col >= 0 && col < self.cols as i32 && row < self.rows as i32
    }

    /// Whether (row, col) holds a locked cell; always false above the grid
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Cell::Occupied(_)))
    }

    /// The single legality predicate for every move, rotation, spawn and drop.
    ///
    /// True if any filled cell of `shape` placed at `(origin_row, origin_col)`
    /// falls outside the columns, at or below the last row, or on an occupied
    /// cell.
    pub fn collides(&self, shape: &Shape, origin_row: i32, origin_col: i32) -> bool {
        shape.filled_cells().iter().any(|&(r, c)| {
            let row = origin_row + r as i32;
            let col = origin_col + c as i32;
            !self.is_in_bounds(row, col) || self.is_occupied(row, col)
        })
    }

    /// Write `color` into every filled cell of `shape` at the origin.
    ///
    /// Callers must have checked `collides` first. Cells above the grid are
    /// skipped.
    pub fn lock(&mut self, shape: &Shape, origin_row: i32, origin_col: i32, color: Rgb) {
        debug_assert!(
            !self.collides(shape, origin_row, origin_col),
            "lock at ({}, {}) without a collision check",
            origin_row,
            origin_col
        );

        for &(r, c) in shape.filled_cells().iter() {
            self.set(
                origin_row + r as i32,
                origin_col + c as i32,
                Cell::Occupied(color),
            );
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row_cells(row)
            .is_some_and(|cells| cells.iter().all(Cell::is_occupied))
    }

    /// Cells of one row, top row is 0
    pub fn row_cells(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows as usize {
            return None;
        }
        let width = self.cols as usize;
        let start = row * width;
        Some(&self.cells[start..start + width])
    }

    /// Remove all full rows and insert as many empty rows at the top.
    /// Returns the number of rows removed.
    ///
    /// Two-pointer compaction from the bottom: each kept row is copied to the
    /// next write slot, so no shifted row is ever skipped.
    pub fn clear_full_rows(&mut self) -> usize {
        debug_assert_eq!(self.cells.len(), self.rows as usize * self.cols as usize);

        let width = self.cols as usize;
        let mut write_row = self.rows as usize;
        let mut cleared = 0;

        for read_row in (0..self.rows as usize).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        self.cells[..write_row * width].fill(Cell::Empty);
        cleared
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_ROWS, BOARD_COLS)
    }
}
