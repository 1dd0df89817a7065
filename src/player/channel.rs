use crate::core::{Board, Mark};
use crate::player::PlayerController;
use tokio::sync::mpsc;

/// Player whose moves arrive as cell selections on a channel (UI clicks, a
/// network peer, a test script).
///
/// Selections of occupied or out-of-range cells are ignored and the wait
/// continues. Dropping every sender cancels the wait and resigns.
pub struct ChannelController {
    mark: Mark,
    name: String,
    rx: mpsc::UnboundedReceiver<usize>,
}

impl ChannelController {
    pub fn new(name: &str, rx: mpsc::UnboundedReceiver<usize>) -> Self {
        Self {
            mark: Mark::Player,
            name: name.to_string(),
            rx,
        }
    }

    /// Controller plus the sender that feeds it.
    pub fn pair(name: &str) -> (Self, mpsc::UnboundedSender<usize>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(name, rx), tx)
    }
}

impl PlayerController for ChannelController {
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
        while let Some(index) = self.rx.recv().await {
            if legal_moves.contains(&index) {
                return Some(index);
            }
            log::debug!("{}: ignoring selection of unavailable cell {}", self.name, index);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_skips_unavailable_cells() {
        let (mut human, tx) = ChannelController::pair("You");
        let board = Board::with_marks(&[(3, Mark::Opponent)]);
        tx.send(3).unwrap();
        tx.send(42).unwrap();
        tx.send(8).unwrap();
        let legal: Vec<usize> = (0..30).filter(|&i| i != 3).collect();
        assert_eq!(human.choose_move(&board, &legal).await, Some(8));
    }

    #[tokio::test]
    async fn test_dropped_sender_resigns() {
        let (mut human, tx) = ChannelController::pair("You");
        tx.send(1).unwrap();
        drop(tx);
        let board = Board::new();
        // the queued selection is still delivered
        assert_eq!(human.choose_move(&board, &[1, 2]).await, Some(1));
        assert_eq!(human.choose_move(&board, &[1, 2]).await, None);
    }
}
