//! Evaluator trait for board evaluation
//!
//! Defines a common interface for different evaluation strategies.

use crate::core::Board;

/// Trait for evaluating board positions
pub trait Evaluator {
    /// Evaluate the board from the Opponent's (AI's) perspective
    ///
    /// Returns:
    ///   - Positive score: Opponent advantage
    ///   - Negative score: Player advantage
    ///
    /// The board is borrowed mutably for scratch placements only; it must be
    /// unchanged when this returns.
    fn evaluate(&self, board: &mut Board) -> f64;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}
