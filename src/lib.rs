//! 5x6 tic-tac-toe with 27 irregular win patterns and a minimax opponent.
//!
//! - [`core`]: board, marks and the shared win-pattern table
//! - [`logic`]: move generation and win/terminal detection
//! - [`player`]: controllers, the heuristic evaluator and the minimax search
//! - [`game`]: round and match (first to N wins) loops
//! - [`selfplay`]: parallel AI-vs-AI matches and their statistics

pub mod core;
pub mod error;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;


pub use crate::core::{Board, Cell, Mark, Position};
pub use crate::error::MoveError;
pub use crate::logic::{available_moves, has_won, is_terminal};
pub use crate::player::ai::{find_best_move, Difficulty};
