use super::types::{Cell, Mark, Position, CELLS, COLS};
use crate::error::MoveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut, Index};

/// 盤面 (5x6, index = row * 6 + col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from `(index, mark)` pairs. Panics on an out-of-range index.
    pub fn with_marks(marks: &[(usize, Mark)]) -> Self {
        let mut board = Board::new();
        for &(index, mark) in marks {
            board.cells[index] = mark.into();
        }
        board
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    pub fn at(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// 着手 (範囲外・埋まっているマスはエラー)
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        match self.cells.get(index) {
            None => Err(MoveError::OutOfRange(index)),
            Some(cell) if !cell.is_empty() => Err(MoveError::Occupied(index)),
            Some(_) => {
                self.cells[index] = mark.into();
                Ok(())
            }
        }
    }

    /// Provisionally places `mark`; the cell is emptied again when the guard drops.
    ///
    /// The caller must only pass an empty, in-range index.
    pub fn scoped_place(&mut self, index: usize, mark: Mark) -> Placement<'_> {
        debug_assert!(self.cells[index].is_empty(), "cell {} is occupied", index);
        self.cells[index] = mark.into();
        Placement { board: self, index }
    }

    pub fn clear(&mut self) {
        *self = Board::default();
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// 記号を入れ替えた盤面
    pub fn swapped(&self) -> Board {
        let mut board = *self;
        for cell in board.cells.iter_mut() {
            *cell = cell.swapped();
        }
        board
    }
}

impl Index<usize> for Board {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            let c = match cell.mark() {
                Some(mark) => mark.symbol(),
                None => '.',
            };
            write!(f, "{}", c)?;
            if i % COLS == COLS - 1 {
                writeln!(f)?;
            } else {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

/// 探索中の仮着手。Drop で必ず元に戻る
pub struct Placement<'a> {
    board: &'a mut Board,
    index: usize,
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.cells[self.index] = Cell::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_rejects_bad_moves() {
        let mut board = Board::new();
        assert_eq!(board.place(30, Mark::Player), Err(MoveError::OutOfRange(30)));
        board.place(4, Mark::Player).unwrap();
        assert_eq!(board.place(4, Mark::Opponent), Err(MoveError::Occupied(4)));
        assert_eq!(board[4], Cell::Player);
        assert_eq!(board, Board::with_marks(&[(4, Mark::Player)]));
    }

    #[test]
    fn test_scoped_place_restores_on_drop() {
        let mut board = Board::with_marks(&[(0, Mark::Player)]);
        let before = board;
        {
            let mut guard = board.scoped_place(7, Mark::Opponent);
            assert_eq!(guard[7], Cell::Opponent);
            {
                let nested = guard.scoped_place(8, Mark::Player);
                assert_eq!(nested[8], Cell::Player);
            }
            assert_eq!(guard[8], Cell::Empty);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_scoped_place_restores_on_unwind() {
        let mut board = Board::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = board.scoped_place(3, Mark::Opponent);
            panic!("search aborted");
        }));
        assert!(result.is_err());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display_grid() {
        let board = Board::with_marks(&[(0, Mark::Player), (29, Mark::Opponent)]);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "X . . . . .");
        assert_eq!(lines[4], ". . . . . O");
    }

    #[test]
    fn test_clear_and_swap() {
        let mut board = Board::with_marks(&[(1, Mark::Player), (2, Mark::Opponent)]);
        let swapped = board.swapped();
        assert_eq!(swapped[1], Cell::Opponent);
        assert_eq!(swapped[2], Cell::Player);
        board.clear();
        assert_eq!(board.count(Cell::Empty), CELLS);
        assert_eq!(board, Board::new());
    }
}
