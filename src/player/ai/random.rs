use crate::core::{Board, Mark};
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// 合法手から一様に選ぶ AI (自己対戦のベースライン)
pub struct RandomAI {
    pub name: String,
    mark: Mark,
    rng: StdRng,
}

impl RandomAI {
    pub fn new(name: &str) -> Self {
        RandomAI {
            name: name.to_string(),
            mark: Mark::Opponent,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(name: &str, seed: u64) -> Self {
        RandomAI {
            name: name.to_string(),
            mark: Mark::Opponent,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn set_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    async fn choose_move(&mut self, _board: &Board, legal_moves: &[usize]) -> Option<usize> {
        legal_moves.choose(&mut self.rng).copied()
    }
}
