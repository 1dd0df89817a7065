use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use toe_ai::player::ai::AIConfig;
use toe_ai::selfplay::{run_selfplay, Contestant, SelfPlayConfig};

/// Pit the minimax AI against itself or a random player on the 5x6 board.
#[derive(Parser)]
#[command(name = "toe-ai", about = "Self-play runner for the 5x6 tic-tac-toe AI")]
struct Cli {
    /// Side playing the Opponent mark: normal, difficult, expert or random
    #[arg(long, default_value = "normal")]
    difficulty: Contestant,

    /// Side playing the Player mark: normal, difficult, expert or random
    #[arg(long, default_value = "random")]
    rival: Contestant,

    /// Override the search depth (plies) of every minimax side
    #[arg(long)]
    depth: Option<usize>,

    /// Number of matches to play
    #[arg(long, default_value_t = 10)]
    matches: usize,

    /// Round wins needed to take a match (defaults to the config value)
    #[arg(long)]
    wins: Option<u32>,

    /// Write a JSON report under selfplay_reports/
    #[arg(long)]
    save: bool,

    /// Path to the JSON AI configuration
    #[arg(long, default_value = "ai_config.json")]
    config: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.config.exists() {
        let config = AIConfig::load_from(&cli.config)
            .with_context(|| format!("loading config from {}", cli.config.display()))?;
        AIConfig::install(config)?;
    }
    let ai_config = AIConfig::get();

    if cli.depth == Some(0) {
        anyhow::bail!("--depth must be at least 1");
    }

    let config = SelfPlayConfig {
        num_matches: cli.matches,
        player_side: cli.rival,
        opponent_side: cli.difficulty,
        depth: cli.depth,
        wins_to_match: cli.wins.unwrap_or(ai_config.game.wins_to_match),
        save_report: cli.save,
        ..SelfPlayConfig::default()
    };

    let depth_of = |c: Contestant| match c {
        Contestant::Minimax(d) => cli.depth.unwrap_or(ai_config.search.depth_for(d)).to_string(),
        Contestant::Random => "-".to_string(),
    };
    println!("=== 5x6 Tic Tac Toe self-play ===");
    println!(
        "Player: {} (depth {}) | Opponent: {} (depth {}) | first to {} | {} matches",
        config.player_side,
        depth_of(config.player_side),
        config.opponent_side,
        depth_of(config.opponent_side),
        config.wins_to_match,
        config.num_matches
    );

    let stats = run_selfplay(&config)?;

    println!("--- Results ---");
    println!(
        "Player wins:   {} ({:.1}%)",
        stats.player_wins,
        stats.win_rate(toe_ai::Mark::Player) * 100.0
    );
    println!(
        "Opponent wins: {} ({:.1}%)",
        stats.opponent_wins,
        stats.win_rate(toe_ai::Mark::Opponent) * 100.0
    );
    println!("Abandoned:     {}", stats.abandoned);
    println!("Player started {} of {} matches", stats.player_started, stats.total_matches);
    println!("Avg rounds:    {:.1}", stats.avg_rounds);
    println!("Avg moves/round: {:.1}", stats.avg_moves_per_round);
    println!("Avg time:      {:.1}s", stats.avg_time_ms / 1000.0);

    Ok(())
}
