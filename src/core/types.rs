use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤面の行数
pub const ROWS: usize = 5;
/// 盤面の列数
pub const COLS: usize = 6;
/// マス数 (index = row * COLS + col)
pub const CELLS: usize = ROWS * COLS;

/// 盤上の記号 (人間 = Player, AI = Opponent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    Player,
    Opponent,
}

impl Mark {
    pub fn other(self) -> Mark {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Opponent => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mark::Player => write!(f, "Player"),
            Mark::Opponent => write!(f, "Opponent"),
        }
    }
}

/// マスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Player,
    Opponent,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Player => Some(Mark::Player),
            Cell::Opponent => Some(Mark::Opponent),
        }
    }

    /// 記号を入れ替えたマス (Empty はそのまま)
    pub fn swapped(self) -> Cell {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::Player => Cell::Opponent,
            Cell::Opponent => Cell::Player,
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Player => Cell::Player,
            Mark::Opponent => Cell::Opponent,
        }
    }
}

/// 盤面座標 (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn from_index(index: usize) -> Self {
        Position {
            row: index / COLS,
            col: index % COLS,
        }
    }

    pub const fn index(self) -> usize {
        self.row * COLS + self.col
    }

    pub fn manhattan(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
