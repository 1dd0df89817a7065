use super::{Game, RoundOutcome, RoundRecord};
use crate::core::Mark;
use crate::player::PlayerController;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rounds after which a match that nobody has won is abandoned.
pub const MAX_ROUNDS: usize = 100;

/// 先手決めのサイコロ
///
/// The Player rolls 1-5 and the Opponent 1-3, so the human is more likely to
/// start. Ties are re-rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub player: u8,
    pub opponent: u8,
}

impl DiceRoll {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let player = rng.gen_range(1..=5);
            let opponent = rng.gen_range(1..=3);
            if player != opponent {
                return DiceRoll { player, opponent };
            }
        }
    }

    pub fn starter(self) -> Mark {
        if self.player > self.opponent {
            Mark::Player
        } else {
            Mark::Opponent
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub player: u32,
    pub opponent: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::Player => self.player,
            Mark::Opponent => self.opponent,
        }
    }

    pub fn add(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win(Mark::Player) => self.player += 1,
            RoundOutcome::Win(Mark::Opponent) => self.opponent += 1,
            RoundOutcome::Draw => self.draws += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// `None` if the match hit [`MAX_ROUNDS`] first.
    pub winner: Option<Mark>,
    pub score: Scoreboard,
    pub starting: Mark,
    pub rounds: Vec<RoundRecord>,
}

/// A match: rounds on a fresh board until one side reaches `wins_to_match`.
pub struct Session {
    pub wins_to_match: u32,
    pub starting: Mark,
    pub score: Scoreboard,
}

impl Session {
    pub fn new(wins_to_match: u32, starting: Mark) -> Self {
        Session {
            wins_to_match,
            starting,
            score: Scoreboard::default(),
        }
    }

    /// Session whose starting side is decided by a [`DiceRoll`].
    pub fn from_dice<R: Rng + ?Sized>(wins_to_match: u32, rng: &mut R) -> (Self, DiceRoll) {
        let dice = DiceRoll::roll(rng);
        (Session::new(wins_to_match, dice.starter()), dice)
    }

    /// Counts a finished round; returns the match winner once there is one.
    pub fn record(&mut self, outcome: RoundOutcome) -> Option<Mark> {
        self.score.add(outcome);
        self.match_winner()
    }

    pub fn match_winner(&self) -> Option<Mark> {
        [Mark::Player, Mark::Opponent]
            .into_iter()
            .find(|&mark| self.score.wins(mark) >= self.wins_to_match)
    }

    /// Plays rounds until the match is decided. `player` is given the Player
    /// mark and `opponent` the Opponent mark; every round is opened by the
    /// same starting side.
    pub async fn play<A, B>(&mut self, player: &mut A, opponent: &mut B) -> MatchResult
    where
        A: PlayerController,
        B: PlayerController,
    {
        player.set_mark(Mark::Player);
        opponent.set_mark(Mark::Opponent);
        log::info!(
            "match: {} vs {}, first to {}, {} starts",
            player.name(),
            opponent.name(),
            self.wins_to_match,
            self.starting
        );

        let mut game = Game::new(self.starting);
        let mut rounds = Vec::new();
        let mut winner = self.match_winner();

        while winner.is_none() && rounds.len() < MAX_ROUNDS {
            game.reset();
            let record = game.play_round(player, opponent, |_, _, _| {}).await;
            winner = self.record(record.outcome);
            log::info!(
                "round {}: {:?} in {} moves (score {}-{}, {} draws)",
                rounds.len() + 1,
                record.outcome,
                record.moves.len(),
                self.score.player,
                self.score.opponent,
                self.score.draws
            );
            rounds.push(record);
        }

        match winner {
            Some(mark) => log::info!("match won by {}", mark),
            None => log::warn!("match abandoned after {} rounds", rounds.len()),
        }

        MatchResult {
            winner,
            score: self.score,
            starting: self.starting,
            rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::RandomAI;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_dice_never_ties() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut starters = [0; 2];
        for _ in 0..500 {
            let dice = DiceRoll::roll(&mut rng);
            assert_ne!(dice.player, dice.opponent);
            assert!((1..=5).contains(&dice.player));
            assert!((1..=3).contains(&dice.opponent));
            match dice.starter() {
                Mark::Player => starters[0] += 1,
                Mark::Opponent => starters[1] += 1,
            }
        }
        // Player wins the roll far more often
        assert!(starters[0] > starters[1]);
    }

    #[test]
    fn test_record_reaches_target() {
        let mut session = Session::new(2, Mark::Player);
        assert_eq!(session.record(RoundOutcome::Win(Mark::Opponent)), None);
        assert_eq!(session.record(RoundOutcome::Draw), None);
        assert_eq!(session.record(RoundOutcome::Win(Mark::Player)), None);
        assert_eq!(
            session.record(RoundOutcome::Win(Mark::Opponent)),
            Some(Mark::Opponent)
        );
        assert_eq!(session.score.draws, 1);
    }

    #[tokio::test]
    async fn test_match_stops_at_first_to_target() {
        let mut a = RandomAI::seeded("A", 1);
        let mut b = RandomAI::seeded("B", 2);
        let mut session = Session::new(3, Mark::Player);
        let result = session.play(&mut a, &mut b).await;
        let winner = result.winner.expect("random play decides a match quickly");
        assert_eq!(result.score.wins(winner), 3);
        assert!(result.score.wins(winner.other()) < 3);
        let decisive = result
            .rounds
            .iter()
            .filter(|r| r.outcome != RoundOutcome::Draw)
            .count() as u32;
        assert_eq!(decisive, result.score.player + result.score.opponent);
        assert!(result.rounds.iter().all(|r| r.starting == Mark::Player));
    }
}
