use crate::error::DifficultyParseError;
use anyhow::Context;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const CONFIG_PATH: &str = "ai_config.json";

static CONFIG: OnceCell<AIConfig> = OnceCell::new();

/// AI の強さ。探索深さと評価ボーナスの段階を決める
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Normal,
    Difficult,
    Expert,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Normal
    }
}

impl Difficulty {
    /// 2-in-a-window bonuses
    pub fn pair_bonuses(self) -> bool {
        self >= Difficulty::Difficult
    }

    /// centre and corner window bonuses
    pub fn placement_bonuses(self) -> bool {
        self == Difficulty::Expert
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Difficulty::Normal),
            "difficult" => Ok(Difficulty::Difficult),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(DifficultyParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Difficulty::Normal => "normal",
            Difficulty::Difficult => "difficult",
            Difficulty::Expert => "expert",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub evaluation: EvaluationConfig,
    pub search: SearchConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// `[Empty, Opponent, Opponent]` window (Difficult+)
    pub opponent_pair_bonus: f64,
    /// `[Empty, Player, Player]` window (Difficult+)
    pub player_pair_bonus: f64,
    /// Expert only
    pub center_bonus: f64,
    /// Expert only
    pub corner_bonus: f64,
    /// pattern holding a Player mark
    pub contest_bonus: f64,
    /// pattern holding an Opponent mark and one empty cell
    pub opponent_near_win_bonus: f64,
    /// any pattern with one empty cell
    pub near_complete_bonus: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub depth_normal: usize,
    pub depth_difficult: usize,
    pub depth_expert: usize,
    /// Score a completed win pattern as decisive instead of leaving it to the heuristic.
    pub terminal_scoring: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub wins_to_match: u32,
    pub think_delay_min_ms: u64,
    pub think_delay_max_ms: u64,
}

impl SearchConfig {
    pub fn depth_for(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Normal => self.depth_normal,
            Difficulty::Difficult => self.depth_difficult,
            Difficulty::Expert => self.depth_expert,
        }
    }
}

impl AIConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: AIConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::debug!("using default AI config: {:#}", e);
            Self::default()
        })
    }

    /// Process-wide config, loaded on first access.
    pub fn get() -> &'static AIConfig {
        CONFIG.get_or_init(Self::load_or_default)
    }

    /// Installs `config` as the process-wide config. Fails if already initialised.
    pub fn install(config: AIConfig) -> anyhow::Result<()> {
        CONFIG
            .set(config)
            .map_err(|_| anyhow::anyhow!("AI config already initialised"))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let search = &self.search;
        if search.depth_normal == 0 || search.depth_difficult == 0 || search.depth_expert == 0 {
            anyhow::bail!("search depths must be at least 1");
        }
        if self.game.wins_to_match == 0 {
            anyhow::bail!("wins_to_match must be at least 1");
        }
        if self.game.think_delay_min_ms > self.game.think_delay_max_ms {
            anyhow::bail!(
                "think delay range is inverted ({} > {})",
                self.game.think_delay_min_ms,
                self.game.think_delay_max_ms
            );
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            opponent_pair_bonus: 20.0,
            player_pair_bonus: 15.0,
            center_bonus: 5.0,
            corner_bonus: 3.0,
            contest_bonus: 5.0,
            opponent_near_win_bonus: 20.0,
            near_complete_bonus: 30.0,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth_normal: 1,
            depth_difficult: 2,
            depth_expert: 3,
            terminal_scoring: true,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            wins_to_match: 5,
            think_delay_min_ms: 500,
            think_delay_max_ms: 1500,
        }
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            evaluation: EvaluationConfig::default(),
            search: SearchConfig::default(),
            game: GameConfig::default(),
        }
    }
}
