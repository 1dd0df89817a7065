//! # Win Pattern Table
//!
//! The 27 coordinate sequences that win a round, and the 3-cell windows the
//! evaluator scans. Both are built once and shared read-only.
//!
//! Patterns are hand-enumerated and deliberately irregular: rows span all six
//! columns, columns span all five rows, and the diagonals run from two to five
//! cells (some of them skip a cell).

use super::types::{Position, COLS, ROWS};
use once_cell::sync::Lazy;

/// 勝利パターン (2〜6マス)
pub type WinPattern = &'static [Position];

const fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

pub static WIN_PATTERNS: [WinPattern; 27] = [
    // Rows
    &[p(0, 0), p(0, 1), p(0, 2), p(0, 3), p(0, 4), p(0, 5)],
    &[p(1, 0), p(1, 1), p(1, 2), p(1, 3), p(1, 4), p(1, 5)],
    &[p(2, 0), p(2, 1), p(2, 2), p(2, 3), p(2, 4), p(2, 5)],
    &[p(3, 0), p(3, 1), p(3, 2), p(3, 3), p(3, 4), p(3, 5)],
    &[p(4, 0), p(4, 1), p(4, 2), p(4, 3), p(4, 4), p(4, 5)],
    // Columns
    &[p(0, 0), p(1, 0), p(2, 0), p(3, 0), p(4, 0)],
    &[p(0, 1), p(1, 1), p(2, 1), p(3, 1), p(4, 1)],
    &[p(0, 2), p(1, 2), p(2, 2), p(3, 2), p(4, 2)],
    &[p(0, 3), p(1, 3), p(2, 3), p(3, 3), p(4, 3)],
    &[p(0, 4), p(1, 4), p(2, 4), p(3, 4), p(4, 4)],
    &[p(0, 5), p(1, 5), p(2, 5), p(3, 5), p(4, 5)],
    // Diagonals
    &[p(0, 1), p(1, 0)],
    &[p(0, 2), p(1, 1), p(2, 0)],
    &[p(0, 3), p(1, 2), p(2, 1), p(3, 0)],
    &[p(0, 4), p(1, 3), p(2, 2), p(4, 0)],
    &[p(0, 5), p(1, 4), p(2, 3), p(4, 1)],
    &[p(1, 5), p(2, 4), p(3, 3), p(4, 2)],
    &[p(2, 5), p(3, 4), p(4, 3)],
    &[p(3, 5), p(4, 4)],
    &[p(3, 0), p(4, 1)],
    &[p(2, 0), p(3, 1), p(4, 2)],
    &[p(1, 0), p(2, 1), p(3, 2), p(4, 3)],
    &[p(0, 0), p(1, 1), p(2, 2), p(3, 3), p(4, 4)],
    &[p(0, 1), p(1, 2), p(3, 4), p(4, 5)],
    &[p(0, 2), p(1, 3), p(2, 4), p(3, 5)],
    &[p(0, 3), p(1, 4), p(2, 5)],
    &[p(0, 4), p(1, 5)],
];

/// 3マスの評価窓 (盤面インデックス)
pub type Window = [usize; 3];

/// All in-bounds 3-cell windows, scanned per start cell in the order
/// row, column, `\` diagonal, `/` diagonal.
pub static WINDOWS: Lazy<Vec<Window>> = Lazy::new(|| {
    let idx = |r: usize, c: usize| r * COLS + c;
    let mut windows = Vec::new();
    for row in 0..ROWS {
        for col in 0..COLS {
            if col + 2 < COLS {
                windows.push([idx(row, col), idx(row, col + 1), idx(row, col + 2)]);
            }
            if row + 2 < ROWS {
                windows.push([idx(row, col), idx(row + 1, col), idx(row + 2, col)]);
            }
            if row + 2 < ROWS && col + 2 < COLS {
                windows.push([
                    idx(row, col),
                    idx(row + 1, col + 1),
                    idx(row + 2, col + 2),
                ]);
                windows.push([
                    idx(row, col + 2),
                    idx(row + 1, col + 1),
                    idx(row + 2, col),
                ]);
            }
        }
    }
    windows
});

/// 中央の窓 (Expert ボーナス対象)
///
/// Only `[2, 3, 4]` is rewarded. The cell order `[3, 2, 4]` is not a line,
/// so it never comes up in the scan.
pub const CENTER_WINDOWS: [Window; 1] = [[2, 3, 4]];

/// 角から角へ (Expert ボーナス対象): first and last cell of the window.
///
/// Cells 0 and 5 are five columns apart, so no 3-cell window spans them and
/// the corner bonus never fires on this board.
pub const CORNER_SPANS: [(usize, usize); 2] = [(0, 5), (5, 0)];

pub fn spans_corners(window: Window) -> bool {
    CORNER_SPANS.contains(&(window[0], window[2]))
}

/// Indices of the patterns that contain `index`.
pub static PATTERNS_BY_CELL: Lazy<Vec<Vec<usize>>> = Lazy::new(|| {
    let mut by_cell = vec![Vec::new(); ROWS * COLS];
    for (i, pattern) in WIN_PATTERNS.iter().enumerate() {
        for pos in pattern.iter() {
            by_cell[pos.index()].push(i);
        }
    }
    by_cell
});
