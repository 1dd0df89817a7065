pub mod board;
pub mod patterns;
pub mod types;

pub use board::{Board, Placement};
pub use patterns::{WinPattern, Window, WINDOWS, WIN_PATTERNS};
pub use types::{Cell, Mark, Position, CELLS, COLS, ROWS};
