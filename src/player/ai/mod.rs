pub mod config;
pub mod eval;
pub mod evaluator;
pub mod minimax;
pub mod names;
pub mod random;

pub use config::{AIConfig, Difficulty};
pub use eval::HeuristicEvaluator;
pub use evaluator::Evaluator;
pub use minimax::{find_best_move, find_best_move_with, MinimaxAI, Search, SearchNode};
pub use random::RandomAI;
