/// Errors from applying a move to the authoritative board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} is outside the 5x6 board")]
    OutOfRange(usize),

    #[error("cell {0} is already occupied")]
    Occupied(usize),
}

/// Error for an unrecognised difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected 'normal', 'difficult' or 'expert')")]
pub struct DifficultyParseError(pub String);
