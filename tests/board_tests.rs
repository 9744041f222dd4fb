//! Board tests - collision, locking and line clearing

use blockfall::core::{Board, Shape};
use blockfall::types::{Cell, Rgb, BOARD_COLS, BOARD_ROWS};

const RED: Rgb = Rgb::new(231, 76, 60);

fn fill_row_except(board: &mut Board, row: i32, gap: Option<i32>) {
    for col in 0..board.cols() as i32 {
        if Some(col) != gap {
            board.set(row, col, Cell::Occupied(RED));
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(BOARD_ROWS, BOARD_COLS);
    assert_eq!((board.rows(), board.cols()), (20, 10));
    assert_eq!(board.occupied_count(), 0);
    for row in 0..20 {
        for col in 0..10 {
            assert_eq!(board.get(row, col), Some(Cell::Empty));
        }
    }
}

#[test]
fn test_board_out_of_bounds() {
    let mut board = Board::default();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, 10), None);
    assert!(!board.set(20, 0, Cell::Occupied(RED)));
    assert!(!board.set(0, -1, Cell::Occupied(RED)));
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_collides_at_walls_and_floor() {
    let board = Board::default();
    let i = Shape::from_rows(&[&[1, 1, 1, 1]]).unwrap();

    assert!(!board.collides(&i, 0, 0));
    assert!(!board.collides(&i, 19, 6));
    assert!(board.collides(&i, 0, -1));
    assert!(board.collides(&i, 0, 7));
    assert!(board.collides(&i, 20, 0));
}

#[test]
fn test_collides_with_locked_cells_only_on_filled_offsets() {
    let mut board = Board::default();
    board.set(1, 4, Cell::Occupied(RED));
    let t = Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]).unwrap();

    // (1, 4) sits under an empty offset of the T.
    assert!(!board.collides(&t, 0, 4));
    // (1, 4) sits under the stem.
    assert!(board.collides(&t, 0, 3));
}

#[test]
fn test_lock_writes_color() {
    let mut board = Board::default();
    let o = Shape::from_rows(&[&[1, 1], &[1, 1]]).unwrap();
    board.lock(&o, 18, 0, RED);

    assert_eq!(board.occupied_count(), 4);
    assert_eq!(board.get(19, 1), Some(Cell::Occupied(RED)));
    assert_eq!(board.get(17, 0), Some(Cell::Empty));
}

#[test]
fn test_clear_keeps_row_count_and_shifts_down() {
    let mut board = Board::default();
    fill_row_except(&mut board, 19, None);
    fill_row_except(&mut board, 17, None);
    board.set(18, 3, Cell::Occupied(RED));
    board.set(16, 7, Cell::Occupied(RED));

    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(board.cells().len(), 200);
    assert_eq!(board.get(19, 3), Some(Cell::Occupied(RED)));
    assert_eq!(board.get(18, 7), Some(Cell::Occupied(RED)));
    assert_eq!(board.occupied_count(), 2);
    for row in 0..18 {
        assert!(board.row_cells(row).unwrap().iter().all(|c| c.is_empty()));
    }
}

#[test]
fn test_clear_is_idempotent() {
    let mut board = Board::default();
    fill_row_except(&mut board, 19, None);
    fill_row_except(&mut board, 18, Some(2));

    assert_eq!(board.clear_full_rows(), 1);
    let after = board.clone();
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board, after);
}

#[test]
fn test_gap_in_last_column() {
    let mut board = Board::default();
    fill_row_except(&mut board, 19, Some(9));

    // An I piece cannot reach into a one-wide gap; it rests on top.
    let i = Shape::from_rows(&[&[1, 1, 1, 1]]).unwrap();
    assert!(board.collides(&i, 19, 6));
    board.lock(&i, 18, 6, RED);
    assert_eq!(board.clear_full_rows(), 0);

    let dot = Shape::from_rows(&[&[1]]).unwrap();
    assert!(!board.collides(&dot, 19, 9));
    board.lock(&dot, 19, 9, RED);
    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(board.rows(), 20);
    // The I piece fell into the cleared row.
    assert!((6..10).all(|c| board.is_occupied(19, c)));
}
