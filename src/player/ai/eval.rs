//! # Evaluation Module
//!
//! Static evaluation of a 5x6 board from the Opponent's (AI's) perspective.
//! Positive scores favour the Opponent, negative scores favour the Player.
//!
//! ## Scoring Strategy
//! 1. **Windows**: every 3-cell row/column/diagonal window is scored by sign
//!    accumulation. One mark is worth 1, two of the same owner 10, three 100;
//!    any window holding both marks is dead and scores 0.
//! 2. **Anticipated replies**: each empty cell is tried as a Player reply and
//!    the win patterns it touches are scored for contest, near-completion and
//!    clustering. These terms are always positive, so they act as a
//!    positional bias rather than a symmetric balance.
//!
//! ## Difficulty
//! - `Difficult`/`Expert` add pair bonuses on windows of shape `[_, O, O]` and
//!   `[_, X, X]`.
//! - `Expert` additionally rewards the centre window `[2, 3, 4]` and any
//!   window running corner to corner (none does on a 5x6 board).

use super::config::{Difficulty, EvaluationConfig};
use super::evaluator::Evaluator;
use crate::core::patterns::{spans_corners, CENTER_WINDOWS};
use crate::core::{Board, Cell, Mark, Position, Window, WINDOWS, WIN_PATTERNS};
use crate::logic::available_moves;

/// 窓1本の基本スコア (記号の符号累積)
///
/// Antisymmetric: swapping every mark negates the result.
pub fn line_score(cells: [Cell; 3]) -> f64 {
    let mut score = 0.0;
    for cell in cells {
        let sign = match cell {
            Cell::Empty => continue,
            Cell::Opponent => 1.0,
            Cell::Player => -1.0,
        };
        if score == 0.0 {
            score = sign;
        } else if (score > 0.0) == (sign > 0.0) {
            score *= 10.0;
        } else {
            // 両者の記号が混在する窓は誰も完成できない
            return 0.0;
        }
    }
    score
}

fn is_mixed(cells: [Cell; 3]) -> bool {
    cells.contains(&Cell::Player) && cells.contains(&Cell::Opponent)
}

pub struct HeuristicEvaluator {
    difficulty: Difficulty,
    weights: EvaluationConfig,
}

impl HeuristicEvaluator {
    pub fn new(difficulty: Difficulty, weights: EvaluationConfig) -> Self {
        Self { difficulty, weights }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(difficulty, EvaluationConfig::default())
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Scores one window, including the difficulty bonuses.
    pub fn evaluate_line(&self, board: &Board, window: Window) -> f64 {
        let cells = window.map(|i| board[i]);
        if is_mixed(cells) {
            return 0.0;
        }
        let mut score = line_score(cells);
        let w = &self.weights;

        if self.difficulty.pair_bonuses() {
            match cells {
                [Cell::Empty, Cell::Opponent, Cell::Opponent] => score += w.opponent_pair_bonus,
                [Cell::Empty, Cell::Player, Cell::Player] => score += w.player_pair_bonus,
                _ => {}
            }
        }

        if self.difficulty.placement_bonuses() {
            if CENTER_WINDOWS.contains(&window) {
                score += w.center_bonus;
            }
            if spans_corners(window) {
                score += w.corner_bonus;
            }
        }

        score
    }

    /// Scores a hypothetical Player reply at `index`, which must already hold
    /// the Player mark on `board`.
    pub fn evaluate_move(&self, board: &Board, index: usize) -> f64 {
        let w = &self.weights;
        let origin = Position::from_index(index);
        let mut score = 0.0;

        let affected = WIN_PATTERNS.iter().filter(|pattern| {
            pattern
                .iter()
                .any(|&pos| !board.at(pos).is_empty() || pos.index() == index)
        });

        for pattern in affected {
            let empties = pattern.iter().filter(|&&pos| board.at(pos).is_empty()).count();
            let has = |cell: Cell| pattern.iter().any(|&pos| board.at(pos) == cell);

            if has(Cell::Player) {
                score += w.contest_bonus;
            }
            if has(Cell::Opponent) && empties == 1 {
                score += w.opponent_near_win_bonus;
            }
            if empties == 1 {
                score += w.near_complete_bonus;
            }

            let distance: usize = pattern.iter().map(|&pos| pos.manhattan(origin)).sum();
            score += 1.0 / (distance as f64 + 1.0);
        }

        score
    }

    pub fn evaluate_windows(&self, board: &Board) -> f64 {
        WINDOWS.iter().map(|&w| self.evaluate_line(board, w)).sum()
    }

    /// Sum of [`Self::evaluate_move`] over every empty cell, each tried as a Player reply.
    pub fn evaluate_replies(&self, board: &mut Board) -> f64 {
        let mut score = 0.0;
        for index in available_moves(board) {
            let reply = board.scoped_place(index, Mark::Player);
            score += self.evaluate_move(&reply, index);
        }
        score
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &mut Board) -> f64 {
        self.evaluate_windows(board) + self.evaluate_replies(board)
    }

    fn name(&self) -> &str {
        match self.difficulty {
            Difficulty::Normal => "heuristic-normal",
            Difficulty::Difficult => "heuristic-difficult",
            Difficulty::Expert => "heuristic-expert",
        }
    }
}
