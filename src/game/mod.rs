pub mod session;

use crate::core::{Board, Mark};
use crate::error::MoveError;
use crate::logic::{available_moves, has_available_move, winner};
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};

pub use session::{DiceRoll, MatchResult, Scoreboard, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Win(Mark),
    Draw,
}

impl RoundOutcome {
    pub fn winner(self) -> Option<Mark> {
        match self {
            RoundOutcome::Win(mark) => Some(mark),
            RoundOutcome::Draw => None,
        }
    }
}

/// 1ラウンドの記録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub outcome: RoundOutcome,
    pub starting: Mark,
    pub moves: Vec<usize>,
    /// The loser resigned or chose an unavailable cell.
    pub forfeit: bool,
}

/// One round on one board.
pub struct Game {
    pub board: Board,
    pub current: Mark,
    pub starting: Mark,
    pub history: Vec<usize>,
}

impl Game {
    pub fn new(starting: Mark) -> Self {
        Game {
            board: Board::new(),
            current: starting,
            starting,
            history: Vec::new(),
        }
    }

    /// 盤面を空にして同じ先手から始め直す
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = self.starting;
        self.history.clear();
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        if let Some(mark) = winner(&self.board) {
            return Some(RoundOutcome::Win(mark));
        }
        if !has_available_move(&self.board) {
            return Some(RoundOutcome::Draw);
        }
        None
    }

    /// Plays `index` for the side to move and passes the turn.
    pub fn apply(&mut self, index: usize) -> Result<(), MoveError> {
        self.board.place(index, self.current)?;
        self.history.push(index);
        self.current = self.current.other();
        Ok(())
    }

    /// Alternates the two controllers until the round ends.
    ///
    /// Each controller is asked for a move only when its mark is to move.
    /// `on_move` sees the board after every applied move.
    pub async fn play_round<A, B, F>(&mut self, a: &mut A, b: &mut B, mut on_move: F) -> RoundRecord
    where
        A: PlayerController,
        B: PlayerController,
        F: FnMut(&Board, usize, Mark),
    {
        loop {
            if let Some(outcome) = self.outcome() {
                return self.record(outcome, false);
            }

            let legal = available_moves(&self.board);
            let mover = self.current;
            let (name, choice) = if a.mark() == mover {
                (a.name().to_string(), a.choose_move(&self.board, &legal).await)
            } else {
                (b.name().to_string(), b.choose_move(&self.board, &legal).await)
            };

            let applied = match choice {
                Some(index) => self.apply(index).map(|_| index),
                None => {
                    log::warn!("{} ({}) resigned", name, mover);
                    return self.record(RoundOutcome::Win(mover.other()), true);
                }
            };

            match applied {
                Ok(index) => on_move(&self.board, index, mover),
                Err(e) => {
                    log::warn!("{} ({}) forfeits the round: {}", name, mover, e);
                    return self.record(RoundOutcome::Win(mover.other()), true);
                }
            }
        }
    }

    fn record(&self, outcome: RoundOutcome, forfeit: bool) -> RoundRecord {
        RoundRecord {
            outcome,
            starting: self.starting,
            moves: self.history.clone(),
            forfeit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ChannelController;

    fn scripted(name: &str, mark: Mark, moves: &[usize]) -> ChannelController {
        let (mut controller, tx) = ChannelController::pair(name);
        controller.set_mark(mark);
        for &m in moves {
            tx.send(m).unwrap();
        }
        controller
    }

    #[tokio::test]
    async fn test_two_cell_diagonal_ends_round() {
        let mut human = scripted("You", Mark::Player, &[1, 6]);
        let mut other = scripted("Other", Mark::Opponent, &[20]);
        let mut game = Game::new(Mark::Player);
        let mut seen = Vec::new();
        let record = game
            .play_round(&mut human, &mut other, |_, index, mark| seen.push((index, mark)))
            .await;
        assert_eq!(record.outcome, RoundOutcome::Win(Mark::Player));
        assert_eq!(record.moves, vec![1, 20, 6]);
        assert!(!record.forfeit);
        assert_eq!(
            seen,
            vec![(1, Mark::Player), (20, Mark::Opponent), (6, Mark::Player)]
        );
    }

    #[tokio::test]
    async fn test_exhausted_script_forfeits() {
        let mut human = scripted("You", Mark::Player, &[]);
        let mut other = scripted("Other", Mark::Opponent, &[0]);
        let mut game = Game::new(Mark::Opponent);
        let record = game.play_round(&mut human, &mut other, |_, _, _| {}).await;
        assert_eq!(record.outcome, RoundOutcome::Win(Mark::Opponent));
        assert!(record.forfeit);
        assert_eq!(record.moves, vec![0]);
    }

    #[test]
    fn test_full_board_without_winner_is_draw() {
        // half-row blocks alternating by row keep every pattern mixed
        let mut game = Game::new(Mark::Player);
        for i in 0..30 {
            let mark = if (i / 6 + i % 6 / 3) % 2 == 0 {
                Mark::Player
            } else {
                Mark::Opponent
            };
            game.board.place(i, mark).unwrap();
        }
        assert_eq!(winner(&game.board), None);
        assert_eq!(game.outcome(), Some(RoundOutcome::Draw));
    }

    #[test]
    fn test_apply_and_reset() {
        let mut game = Game::new(Mark::Opponent);
        game.apply(4).unwrap();
        assert_eq!(game.current, Mark::Player);
        assert_eq!(game.apply(4), Err(MoveError::Occupied(4)));
        game.reset();
        assert_eq!(game.current, Mark::Opponent);
        assert!(game.history.is_empty());
        assert_eq!(game.board, Board::new());
    }
}
