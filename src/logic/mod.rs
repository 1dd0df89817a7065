use crate::core::patterns::PATTERNS_BY_CELL;
use crate::core::{Board, Cell, Mark, CELLS, WIN_PATTERNS};

/// 合法手生成
///
/// Every empty index in ascending order. The order is part of the contract:
/// the search keeps the first move that reaches the best score, so changing
/// it changes which of several equal moves the AI plays.
pub fn available_moves(board: &Board) -> Vec<usize> {
    (0..CELLS).filter(|&i| board[i].is_empty()).collect()
}

pub fn has_available_move(board: &Board) -> bool {
    board.cells().iter().any(|c| c.is_empty())
}

/// `mark` がいずれかの勝利パターンを全て埋めているか
pub fn has_won(board: &Board, mark: Mark) -> bool {
    let cell = Cell::from(mark);
    WIN_PATTERNS
        .iter()
        .any(|pattern| pattern.iter().all(|&pos| board.at(pos) == cell))
}

/// Whether a pattern running through `index` is wholly owned by `mark`.
///
/// Cheaper than [`has_won`] when only the last placement can have changed
/// the outcome.
pub fn completes_pattern(board: &Board, index: usize, mark: Mark) -> bool {
    let cell = Cell::from(mark);
    PATTERNS_BY_CELL[index].iter().any(|&p| {
        WIN_PATTERNS[p]
            .iter()
            .all(|&pos| board.at(pos) == cell)
    })
}

pub fn winner(board: &Board) -> Option<Mark> {
    [Mark::Player, Mark::Opponent]
        .into_iter()
        .find(|&mark| has_won(board, mark))
}

/// 終局判定 (どちらかの勝ち、または空きマスなし)
pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || !has_available_move(board)
}
