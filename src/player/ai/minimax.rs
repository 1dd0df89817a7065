use super::config::{AIConfig, Difficulty};
use super::eval::HeuristicEvaluator;
use super::evaluator::Evaluator;
use super::names::random_ai_name;
use crate::core::{Board, Mark};
use crate::logic::{available_moves, completes_pattern};
use crate::player::PlayerController;
use rand::Rng;
use std::time::{Duration, Instant};

/// Score of a completed win pattern. Far above anything the heuristic produces.
pub const WIN_SCORE: f64 = 1_000_000.0;

/// 探索ノードの結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    pub score: f64,
    /// `None` at leaves, or when the board had no empty cell.
    pub position: Option<usize>,
}

/// Depth-bounded minimax over a single scratch board.
///
/// The AI always plays [`Mark::Opponent`] and maximises; the Player minimises.
pub struct Search<E: Evaluator> {
    evaluator: E,
    depth: usize,
    terminal_scoring: bool,
    nodes: usize,
}

impl<E: Evaluator> Search<E> {
    pub fn new(evaluator: E, depth: usize) -> Self {
        Self {
            evaluator,
            depth,
            terminal_scoring: true,
            nodes: 0,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn terminal_scoring(mut self, enabled: bool) -> Self {
        self.terminal_scoring = enabled;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Evaluated leaves in the last search.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Best move for the Opponent, or `None` when the board is full.
    ///
    /// The board is used as scratch space and is identical on return.
    pub fn find_best_move(&mut self, board: &mut Board) -> Option<usize> {
        self.nodes = 0;
        self.minimax(board, self.depth, Mark::Opponent).position
    }

    /// Moves are tried in ascending index order and `best` is replaced only on
    /// strict improvement, so the lowest index wins a tie.
    pub fn minimax(&mut self, board: &mut Board, depth: usize, turn: Mark) -> SearchNode {
        let moves = available_moves(board);
        if moves.is_empty() || depth == 0 {
            self.nodes += 1;
            return SearchNode {
                score: self.evaluator.evaluate(board),
                position: None,
            };
        }

        let mut best = SearchNode {
            score: match turn {
                Mark::Opponent => f64::NEG_INFINITY,
                Mark::Player => f64::INFINITY,
            },
            position: None,
        };

        for index in moves {
            let mut child = board.scoped_place(index, turn);
            let score = if self.terminal_scoring && completes_pattern(&child, index, turn) {
                // 早い勝ちほど高く評価
                let magnitude = WIN_SCORE + (depth - 1) as f64;
                match turn {
                    Mark::Opponent => magnitude,
                    Mark::Player => -magnitude,
                }
            } else {
                self.minimax(&mut child, depth - 1, turn.other()).score
            };
            drop(child);

            let improves = match turn {
                Mark::Opponent => score > best.score,
                Mark::Player => score < best.score,
            };
            if improves {
                best = SearchNode {
                    score,
                    position: Some(index),
                };
            }
        }

        best
    }
}

impl Search<HeuristicEvaluator> {
    pub fn from_config(config: &AIConfig, difficulty: Difficulty) -> Self {
        let evaluator = HeuristicEvaluator::new(difficulty, config.evaluation.clone());
        Search::new(evaluator, config.search.depth_for(difficulty))
            .terminal_scoring(config.search.terminal_scoring)
    }
}

/// Best Opponent move for `difficulty` with the built-in weights and depths.
///
/// Pure: never consults the config file. Use [`find_best_move_with`] to search
/// with a loaded [`AIConfig`].
pub fn find_best_move(board: &Board, difficulty: Difficulty) -> Option<usize> {
    find_best_move_with(board, difficulty, &AIConfig::default())
}

pub fn find_best_move_with(board: &Board, difficulty: Difficulty, config: &AIConfig) -> Option<usize> {
    let mut scratch = *board;
    Search::from_config(config, difficulty).find_best_move(&mut scratch)
}

pub struct MinimaxAI {
    pub mark: Mark,
    pub name: String,
    search: Search<HeuristicEvaluator>,
    think_delay: (Duration, Duration),
}

impl MinimaxAI {
    pub fn new(name: &str, difficulty: Difficulty) -> Self {
        Self::from_config(name, difficulty, AIConfig::get())
    }

    /// AI with a random display name such as `Hermes(AI)`.
    pub fn named_randomly(difficulty: Difficulty) -> Self {
        let name = random_ai_name(&mut rand::thread_rng());
        Self::new(&name, difficulty)
    }

    pub fn from_config(name: &str, difficulty: Difficulty, config: &AIConfig) -> Self {
        Self {
            mark: Mark::Opponent,
            name: name.to_string(),
            search: Search::from_config(config, difficulty),
            think_delay: (
                Duration::from_millis(config.game.think_delay_min_ms),
                Duration::from_millis(config.game.think_delay_max_ms),
            ),
        }
    }

    /// Overrides the ply count chosen by the difficulty.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.search = self.search.with_depth(depth);
        self
    }

    pub fn with_think_delay(mut self, min: Duration, max: Duration) -> Self {
        self.think_delay = (min, max.max(min));
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.search.evaluator().difficulty()
    }

    pub fn depth(&self) -> usize {
        self.search.depth()
    }

    /// 盤面から最善手を計算する (待ち時間なし)
    ///
    /// The search always maximises for [`Mark::Opponent`]; when this AI plays
    /// the Player mark the board is mirrored first.
    pub fn best_move(&mut self, board: &Board) -> Option<usize> {
        let mut scratch = match self.mark {
            Mark::Opponent => *board,
            Mark::Player => board.swapped(),
        };
        let started = Instant::now();
        let best = self.search.find_best_move(&mut scratch);
        log::debug!(
            "{} ({}, depth {}) chose {:?} after {} leaves in {:?}",
            self.name,
            self.search.evaluator().name(),
            self.search.depth(),
            best,
            self.search.nodes(),
            started.elapsed()
        );
        best
    }

    fn pick_delay(&self) -> Duration {
        let (min, max) = self.think_delay;
        if max <= min {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

impl PlayerController for MinimaxAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    async fn choose_move(&mut self, board: &Board, _legal_moves: &[usize]) -> Option<usize> {
        let best = self.best_move(board);
        // 演出用の待ち時間
        let delay = self.pick_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, CELLS};
    use std::cell::Cell as Counter;

    /// Scores every board the same, so every choice is a tie.
    struct FlatEvaluator {
        calls: Counter<usize>,
    }

    impl Evaluator for FlatEvaluator {
        fn evaluate(&self, _board: &mut Board) -> f64 {
            self.calls.set(self.calls.get() + 1);
            0.0
        }

        fn name(&self) -> &str {
            "flat"
        }
    }

    /// Opponent marks are good, Player marks bad, nothing else matters.
    struct CountEvaluator;

    impl Evaluator for CountEvaluator {
        fn evaluate(&self, board: &mut Board) -> f64 {
            board.count(Cell::Opponent) as f64 - board.count(Cell::Player) as f64
        }

        fn name(&self) -> &str {
            "count"
        }
    }

    fn heuristic(depth: usize) -> Search<HeuristicEvaluator> {
        Search::from_config(&AIConfig::default(), Difficulty::Normal).with_depth(depth)
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        let mut board = Board::with_marks(&[(0, Mark::Player), (29, Mark::Opponent)]);
        let mut search = Search::new(
            FlatEvaluator {
                calls: Counter::new(0),
            },
            2,
        );
        assert_eq!(search.find_best_move(&mut board), Some(1));
        // 28 root moves * 27 replies
        assert_eq!(search.evaluator().calls.get(), 28 * 27);
        assert_eq!(search.nodes(), 28 * 27);
    }

    #[test]
    fn test_full_board_returns_none() {
        let marks: Vec<(usize, Mark)> = (0..CELLS)
            .map(|i| (i, if i % 2 == 0 { Mark::Player } else { Mark::Opponent }))
            .collect();
        let mut board = Board::with_marks(&marks);
        let mut search = Search::new(CountEvaluator, 3);
        let node = search.minimax(&mut board, 3, Mark::Opponent);
        assert_eq!(node.position, None);
        assert_eq!(node.score, 0.0);
        assert_eq!(search.find_best_move(&mut board), None);
    }

    #[test]
    fn test_depth_zero_is_a_leaf() {
        let mut board = Board::new();
        let mut search = Search::new(CountEvaluator, 0);
        let node = search.minimax(&mut board, 0, Mark::Opponent);
        assert_eq!(node, SearchNode { score: 0.0, position: None });
    }

    #[test]
    fn test_minimizer_and_maximizer_alternate() {
        let mut board = Board::new();
        let mut search = Search::new(CountEvaluator, 2).terminal_scoring(false);
        // one Opponent mark then one Player mark, whatever the order
        let node = search.minimax(&mut board, 2, Mark::Opponent);
        assert_eq!(node.score, 0.0);
        assert_eq!(node.position, Some(0));
        let node = search.minimax(&mut board, 1, Mark::Player);
        assert_eq!(node.score, -1.0);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_completes_available_win() {
        // (0,2),(1,1),(2,0) is a three-cell pattern
        let mut board = Board::with_marks(&[(2, Mark::Opponent), (7, Mark::Opponent)]);
        let before = board;
        let mut search = heuristic(1);
        assert_eq!(search.find_best_move(&mut board), Some(12));
        assert_eq!(board, before);
    }

    #[test]
    fn test_blocks_player_win() {
        let mut board = Board::with_marks(&[
            (2, Mark::Player),
            (7, Mark::Player),
            (20, Mark::Opponent),
        ]);
        let mut search = heuristic(2);
        assert_eq!(search.find_best_move(&mut board), Some(12));
    }

    #[test]
    fn test_prefers_immediate_win_over_later_one() {
        let mut board = Board::with_marks(&[(1, Mark::Opponent)]);
        let mut search = Search::new(CountEvaluator, 3);
        // (0,1)-(1,0) completes at once
        let node = search.minimax(&mut board, 3, Mark::Opponent);
        assert_eq!(node.position, Some(6));
        assert_eq!(node.score, WIN_SCORE + 2.0);
    }

    #[test]
    fn test_heuristic_only_mode_ignores_wins() {
        let mut board = Board::with_marks(&[(2, Mark::Opponent), (7, Mark::Opponent)]);
        let mut search = heuristic(1).terminal_scoring(false);
        let best = search.find_best_move(&mut board);
        assert!(best.is_some());
        assert_ne!(best, Some(12));
    }

    #[test]
    fn test_find_best_move_uses_given_config() {
        let board = Board::with_marks(&[(2, Mark::Opponent), (7, Mark::Opponent)]);
        assert_eq!(find_best_move(&board, Difficulty::Normal), Some(12));
        assert_eq!(
            find_best_move_with(&board, Difficulty::Normal, &AIConfig::default()),
            Some(12)
        );

        let mut config = AIConfig::default();
        config.search.terminal_scoring = false;
        let best = find_best_move_with(&board, Difficulty::Normal, &config);
        assert!(best.is_some());
        assert_ne!(best, Some(12));
        assert_eq!(board, Board::with_marks(&[(2, Mark::Opponent), (7, Mark::Opponent)]));
    }

    #[test]
    fn test_minimax_ai_plays_player_mark_by_mirroring() {
        let mut ai = MinimaxAI::from_config("mirror", Difficulty::Normal, &AIConfig::default());
        ai.set_mark(Mark::Player);
        let board = Board::with_marks(&[(2, Mark::Player), (7, Mark::Player)]);
        assert_eq!(ai.best_move(&board), Some(12));
    }

    #[tokio::test]
    async fn test_choose_move_without_delay() {
        let mut ai = MinimaxAI::from_config("quick", Difficulty::Difficult, &AIConfig::default())
            .with_think_delay(Duration::ZERO, Duration::ZERO)
            .with_depth(1);
        let board = Board::with_marks(&[(1, Mark::Opponent), (10, Mark::Player)]);
        let legal = available_moves(&board);
        let mv = ai.choose_move(&board, &legal).await;
        assert_eq!(mv, Some(6));
    }
}
