//! Active piece - the falling, player-controlled piece
//!
//! Every move and rotation is validated with [`Board::collides`] and leaves the
//! piece untouched when it fails. Rotation fails in place: no kick offsets are
//! searched.

use crate::board::Board;
use crate::catalog::CatalogEntry;
use crate::shape::Shape;
use crate::types::{PieceKind, Rgb};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current orientation; may be a rotated copy of the catalog shape
    pub shape: Shape,
    pub color: Rgb,
    /// Bounding-box origin row (top)
    pub row: i32,
    /// Bounding-box origin column (left)
    pub col: i32,
}

/// Column that centers a shape of `shape_width` (biased left on odd widths)
pub fn spawn_col(board_cols: u16, shape_width: u8) -> i32 {
    board_cols as i32 / 2 - shape_width as i32 / 2
}

impl ActivePiece {
    /// Create a piece at the spawn position for `board`.
    ///
    /// The caller checks [`ActivePiece::collides`] to detect a blocked spawn.
    pub fn spawn(entry: CatalogEntry, board: &Board) -> Self {
        Self {
            kind: entry.kind,
            shape: entry.shape,
            color: entry.color,
            row: 0,
            col: spawn_col(board.cols(), entry.shape.width()),
        }
    }

    /// Whether the piece overlaps walls, floor or locked cells where it is
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.row, self.col)
    }

    /// Translate by (d_row, d_col) if legal
    pub fn try_move(&mut self, board: &Board, d_row: i32, d_col: i32) -> bool {
        if board.collides(&self.shape, self.row + d_row, self.col + d_col) {
            return false;
        }
        self.row += d_row;
        self.col += d_col;
        true
    }

    /// Rotate clockwise around the fixed origin if legal
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotated = self.shape.rotate_cw();
        if board.collides(&rotated, self.row, self.col) {
            return false;
        }
        self.shape = rotated;
        true
    }

    /// Move down until blocked; returns the number of rows fallen.
    ///
    /// Only repositions the piece. Locking is the caller's job.
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        let mut fallen = 0;
        while self.try_move(board, 1, 0) {
            fallen += 1;
        }
        fallen
    }

    /// Check if the piece is resting on something
    pub fn is_grounded(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.row + 1, self.col)
    }

    /// Row the piece would come to rest on after a hard drop
    pub fn ghost_row(&self, board: &Board) -> i32 {
        let mut ghost = *self;
        ghost.hard_drop(board);
        ghost.row
    }

    /// Absolute (row, col) board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .into_iter()
            .map(move |(r, c)| (self.row + r as i32, self.col + c as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn piece(kind: PieceKind, board: &Board) -> ActivePiece {
        ActivePiece::spawn(CatalogEntry::canonical(kind), board)
    }

    #[test]
    fn test_spawn_column_centers_piece() {
        let board = Board::default();
        assert_eq!(piece(PieceKind::I, &board).col, 3);
        assert_eq!(piece(PieceKind::T, &board).col, 4);
        assert_eq!(piece(PieceKind::O, &board).col, 4);
        assert_eq!(spawn_col(9, 3), 3);
    }

    #[test]
    fn test_try_move_walls() {
        let board = Board::default();
        let mut p = piece(PieceKind::I, &board);

        let mut moved = 0;
        while p.try_move(&board, 0, -1) {
            moved += 1;
        }
        assert_eq!(moved, 3);
        assert_eq!(p.col, 0);

        while p.try_move(&board, 0, 1) {}
        assert_eq!(p.col, 6);
    }

    #[test]
    fn test_failed_move_leaves_piece_unchanged() {
        let mut board = Board::default();
        let mut p = piece(PieceKind::O, &board);
        board.set(2, 4, Cell::Occupied(Rgb::new(9, 9, 9)));
        let before = p;
        assert!(!p.try_move(&board, 1, 0));
        assert_eq!(p, before);
    }

    #[test]
    fn test_hard_drop_rests_on_floor() {
        let board = Board::default();
        let mut p = piece(PieceKind::T, &board);
        let ghost = p.ghost_row(&board);
        assert_eq!(p.hard_drop(&board), 18);
        assert_eq!(p.row, 18);
        assert_eq!(ghost, 18);
        assert!(p.is_grounded(&board));
    }

    #[test]
    fn test_rotate_fails_in_place_against_wall() {
        let board = Board::default();
        let mut p = piece(PieceKind::I, &board);
        assert!(p.try_rotate(&board)); // vertical, rows 0..4
        while p.try_move(&board, 0, 1) {}
        assert_eq!(p.col, 9);
        let before = p;
        // Horizontal again would need columns 9..13.
        assert!(!p.try_rotate(&board));
        assert_eq!(p, before);
    }

    #[test]
    fn test_four_rotations_restore_piece() {
        let board = Board::default();
        for kind in PieceKind::ALL {
            let mut p = piece(kind, &board);
            p.try_move(&board, 4, 0);
            let start = p;
            for _ in 0..4 {
                assert!(p.try_rotate(&board), "{kind:?}");
            }
            assert_eq!(p, start, "{kind:?}");
        }
    }

    #[test]
    fn test_cells_are_absolute() {
        let board = Board::default();
        let p = piece(PieceKind::O, &board);
        let cells: Vec<_> = p.cells().collect();
        assert_eq!(cells, vec![(0, 4), (0, 5), (1, 4), (1, 5)]);
    }
}
