use crate::core::{Board, Mark};

/// プレイヤー操作のtrait
///
/// `choose_move` resolves to `None` when the player resigns or its input
/// source goes away.
#[allow(async_fn_in_trait)]
pub trait PlayerController {
    fn name(&self) -> &str;
    fn mark(&self) -> Mark;
    fn set_mark(&mut self, mark: Mark);
    async fn choose_move(&mut self, board: &Board, legal_moves: &[usize]) -> Option<usize>;
}
