use crate::core::{Board, Mark};
use crate::game::{MatchResult, Session};
use crate::player::ai::{AIConfig, Difficulty, MinimaxAI, RandomAI};
use crate::player::PlayerController;
use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

/// 自己対戦の参加者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contestant {
    Minimax(Difficulty),
    Random,
}

impl FromStr for Contestant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("random") {
            return Ok(Contestant::Random);
        }
        Ok(Contestant::Minimax(s.parse()?))
    }
}

impl fmt::Display for Contestant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Contestant::Minimax(d) => write!(f, "minimax-{}", d),
            Contestant::Random => write!(f, "random"),
        }
    }
}

pub struct SelfPlayConfig {
    pub num_matches: usize,
    /// Plays the Player mark.
    pub player_side: Contestant,
    /// Plays the Opponent mark.
    pub opponent_side: Contestant,
    /// Overrides the configured ply count of both minimax sides.
    pub depth: Option<usize>,
    pub wins_to_match: u32,
    pub save_report: bool,
    pub report_dir: PathBuf,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            num_matches: 10,
            player_side: Contestant::Random,
            opponent_side: Contestant::Minimax(Difficulty::Normal),
            depth: None,
            wins_to_match: AIConfig::get().game.wins_to_match,
            save_report: false,
            report_dir: PathBuf::from("selfplay_reports"),
        }
    }
}

/// Either kind of self-play controller behind one type.
enum Contender {
    Minimax(MinimaxAI),
    Random(RandomAI),
}

impl Contender {
    fn build(kind: Contestant, depth: Option<usize>, config: &AIConfig) -> Self {
        match kind {
            Contestant::Minimax(difficulty) => {
                let name = format!("minimax-{}", difficulty);
                let mut ai = MinimaxAI::from_config(&name, difficulty, config)
                    .with_think_delay(Duration::ZERO, Duration::ZERO);
                if let Some(depth) = depth {
                    ai = ai.with_depth(depth);
                }
                Contender::Minimax(ai)
            }
            Contestant::Random => Contender::Random(RandomAI::new("random")),
        }
    }
}

impl PlayerController for Contender {
    fn name(&self) -> &str {
        match self {
            Contender::Minimax(ai) => ai.name(),
            Contender::Random(ai) => ai.name(),
        }
    }

    fn mark(&self) -> Mark {
        match self {
            Contender::Minimax(ai) => ai.mark(),
            Contender::Random(ai) => ai.mark(),
        }
    }

    fn set_mark(&mut self, mark: Mark) {
        match self {
            Contender::Minimax(ai) => ai.set_mark(mark),
            Contender::Random(ai) => ai.set_mark(mark),
        }
    }

    async fn choose_move(&mut self, board: &Board, legal_moves: &[usize]) -> Option<usize> {
        match self {
            Contender::Minimax(ai) => ai.choose_move(board, legal_moves).await,
            Contender::Random(ai) => ai.choose_move(board, legal_moves).await,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub index: usize,
    pub winner: Option<Mark>,
    pub starting: Mark,
    pub rounds: usize,
    pub round_draws: u32,
    pub moves: usize,
    pub forfeits: usize,
    pub time_ms: u128,
}

impl MatchSummary {
    fn new(index: usize, result: &MatchResult, elapsed: Duration) -> Self {
        Self {
            index,
            winner: result.winner,
            starting: result.starting,
            rounds: result.rounds.len(),
            round_draws: result.score.draws,
            moves: result.rounds.iter().map(|r| r.moves.len()).sum(),
            forfeits: result.rounds.iter().filter(|r| r.forfeit).count(),
            time_ms: elapsed.as_millis(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_matches: usize,
    pub player_wins: usize,
    pub opponent_wins: usize,
    pub abandoned: usize,
    pub player_started: usize,
    pub avg_rounds: f64,
    pub avg_moves_per_round: f64,
    pub avg_time_ms: f64,
    pub player_side: String,
    pub opponent_side: String,
    pub created_at: String,
    pub matches: Vec<MatchSummary>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self {
            total_matches: 0,
            player_wins: 0,
            opponent_wins: 0,
            abandoned: 0,
            player_started: 0,
            avg_rounds: 0.0,
            avg_moves_per_round: 0.0,
            avg_time_ms: 0.0,
            player_side: String::new(),
            opponent_side: String::new(),
            created_at: chrono::Local::now().to_rfc3339(),
            matches: Vec::new(),
        }
    }

    pub fn add_result(&mut self, summary: MatchSummary) {
        self.total_matches += 1;
        match summary.winner {
            Some(Mark::Player) => self.player_wins += 1,
            Some(Mark::Opponent) => self.opponent_wins += 1,
            None => self.abandoned += 1,
        }
        if summary.starting == Mark::Player {
            self.player_started += 1;
        }
        self.matches.push(summary);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        let n = self.matches.len() as f64;
        let total_rounds: usize = self.matches.iter().map(|m| m.rounds).sum();
        let total_moves: usize = self.matches.iter().map(|m| m.moves).sum();
        let total_time: u128 = self.matches.iter().map(|m| m.time_ms).sum();
        self.avg_rounds = total_rounds as f64 / n;
        self.avg_moves_per_round = if total_rounds == 0 {
            0.0
        } else {
            total_moves as f64 / total_rounds as f64
        };
        self.avg_time_ms = total_time as f64 / n;
    }

    pub fn win_rate(&self, mark: Mark) -> f64 {
        if self.total_matches == 0 {
            return 0.0;
        }
        let wins = match mark {
            Mark::Player => self.player_wins,
            Mark::Opponent => self.opponent_wins,
        };
        wins as f64 / self.total_matches as f64
    }
}

impl Default for SelfPlayStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `config.num_matches` independent matches on the rayon pool.
pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    run_selfplay_with(config, AIConfig::get())
}

pub fn run_selfplay_with(config: &SelfPlayConfig, ai_config: &AIConfig) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new();
    stats.player_side = config.player_side.to_string();
    stats.opponent_side = config.opponent_side.to_string();

    let mut summaries = (1..=config.num_matches)
        .into_par_iter()
        .map(|index| run_match(index, config, ai_config))
        .collect::<anyhow::Result<Vec<_>>>()?;
    summaries.sort_by_key(|s| s.index);

    for summary in summaries {
        stats.add_result(summary);
    }

    log::info!(
        "self-play done: {} matches, {} {:.1}% / {} {:.1}%, {} abandoned",
        stats.total_matches,
        stats.player_side,
        stats.win_rate(Mark::Player) * 100.0,
        stats.opponent_side,
        stats.win_rate(Mark::Opponent) * 100.0,
        stats.abandoned
    );

    if config.save_report {
        let path = save_report(&stats, &config.report_dir)?;
        log::info!("report written to {}", path.display());
    }

    Ok(stats)
}

fn run_match(index: usize, config: &SelfPlayConfig, ai_config: &AIConfig) -> anyhow::Result<MatchSummary> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("building match runtime")?;

    let mut player = Contender::build(config.player_side, config.depth, ai_config);
    let mut opponent = Contender::build(config.opponent_side, config.depth, ai_config);
    let (mut session, dice) = Session::from_dice(config.wins_to_match, &mut rand::thread_rng());
    log::debug!(
        "match {}: dice {}-{}, {} starts",
        index,
        dice.player,
        dice.opponent,
        dice.starter()
    );

    let start_time = Instant::now();
    let result = runtime.block_on(session.play(&mut player, &mut opponent));
    let summary = MatchSummary::new(index, &result, start_time.elapsed());
    log::info!(
        "match {}/{}: {} after {} rounds ({} ms)",
        index,
        config.num_matches,
        match summary.winner {
            Some(mark) => format!("{} wins", mark),
            None => "abandoned".to_string(),
        },
        summary.rounds,
        summary.time_ms
    );
    Ok(summary)
}

pub fn save_report(stats: &SelfPlayStats, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let filename = dir.join(format!(
        "selfplay_{}_vs_{}_{}.json",
        stats.player_side,
        stats.opponent_side,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let file = std::fs::File::create(&filename)
        .with_context(|| format!("creating {}", filename.display()))?;
    serde_json::to_writer_pretty(file, stats)?;
    Ok(filename)
}
