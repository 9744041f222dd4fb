//! Shape module - immutable binary shape matrices and rotation
//!
//! A shape is a rectangular 0/1 matrix of at most 4x4 cells, stored by value.
//! Offsets are (row, col) relative to the top-left corner of the bounding box.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::MAX_SHAPE_DIM;

/// Offset of a single filled cell relative to the bounding-box origin
pub type CellOffset = (u8, u8);

/// Filled cells of a shape, stack-allocated
pub type FilledCells = ArrayVec<CellOffset, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Rectangular binary matrix describing a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    height: u8,
    width: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns `None` for empty, ragged, all-zero or oversized matrices.
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let t = Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]).unwrap();
    /// assert_eq!((t.height(), t.width()), (2, 3));
    /// assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_none());
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_DIM || width == 0 || width > MAX_SHAPE_DIM {
            return None;
        }

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut any = false;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return None;
            }
            for (c, &v) in row.iter().enumerate() {
                bits[r][c] = v != 0;
                any |= v != 0;
            }
        }

        if !any {
            return None;
        }

        Some(Self {
            height: height as u8,
            width: width as u8,
            bits,
        })
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// All filled cells in row-major order
    pub fn filled_cells(&self) -> FilledCells {
        let mut out = FilledCells::new();
        for r in 0..self.height as usize {
            for c in 0..self.width as usize {
                if self.bits[r][c] {
                    out.push((r as u8, c as u8));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: `rotated[i][j] = original[h - 1 - j][i]`.
    ///
    /// An `h x w` shape becomes `w x h`. The receiver is never modified.
    pub fn rotate_cw(&self) -> Self {
        let h = self.height as usize;
        let w = self.width as usize;
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, row) in bits.iter_mut().enumerate().take(w) {
            for (j, bit) in row.iter_mut().enumerate().take(h) {
                *bit = self.bits[h - 1 - j][i];
            }
        }
        Self {
            height: self.width,
            width: self.height,
            bits,
        }
    }

    /// Rows as 0/1 vectors (for display and debugging)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|r| {
                (0..self.width as usize)
                    .map(|c| u8::from(self.bits[r][c]))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_shape() -> Shape {
        Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Shape::from_rows(&[]).is_none());
        assert!(Shape::from_rows(&[&[]]).is_none());
        assert!(Shape::from_rows(&[&[0, 0], &[0, 0]]).is_none());
        assert!(Shape::from_rows(&[&[1, 1, 1, 1, 1]]).is_none());
        assert!(Shape::from_rows(&[&[1], &[1], &[1], &[1], &[1]]).is_none());
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = t_shape().rotate_cw();
        assert_eq!(rotated.to_rows(), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
    }

    #[test]
    fn test_rotate_i_swaps_dimensions() {
        let i = Shape::from_rows(&[&[1, 1, 1, 1]]).unwrap();
        let v = i.rotate_cw();
        assert_eq!((v.height(), v.width()), (4, 1));
        assert_eq!(v.filled_cells().len(), 4);
    }

    #[test]
    fn test_rotation_is_four_cycle() {
        let t = t_shape();
        let back = t.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
        assert_eq!(back, t);
        assert_ne!(t.rotate_cw(), t);
    }

    #[test]
    fn test_filled_cells_row_major() {
        let l = Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]).unwrap();
        assert_eq!(
            l.filled_cells().as_slice(),
            &[(0, 0), (1, 0), (1, 1), (1, 2)]
        );
    }
}
