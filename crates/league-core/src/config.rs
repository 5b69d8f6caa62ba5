use crate::error::{LeagueError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Points awarded per result. Draws award nothing unless configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoring {
    #[serde(default = "default_win_points")]
    pub win: u32,
    #[serde(default = "default_loss_points")]
    pub loss: u32,
    #[serde(default)]
    pub draw: u32,
}

fn default_win_points() -> u32 {
    3
}

fn default_loss_points() -> u32 {
    1
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            win: default_win_points(),
            loss: default_loss_points(),
            draw: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// LeagueInfo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// LeagueConfig (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    pub league: LeagueInfo,
    /// Starting budget for every team, restored when a roster is cleared.
    #[serde(default = "default_initial_budget")]
    pub initial_budget: i64,
    #[serde(default)]
    pub scoring: Scoring,
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

fn default_version() -> u32 {
    1
}

fn default_initial_budget() -> i64 {
    180
}

fn default_command_prefix() -> String {
    "!".to_string()
}

impl LeagueConfig {
    pub fn new(league_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            league: LeagueInfo {
                name: league_name.into(),
                description: None,
            },
            initial_budget: default_initial_budget(),
            scoring: Scoring::default(),
            command_prefix: default_command_prefix(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(LeagueError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: LeagueConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut warn = |level: WarnLevel, message: String| {
            warnings.push(ConfigWarning { level, message })
        };

        if self.command_prefix.is_empty() {
            warn(
                WarnLevel::Error,
                "command_prefix is empty; every message would be parsed as a command".into(),
            );
        } else if self.command_prefix.chars().any(char::is_whitespace) {
            warn(
                WarnLevel::Error,
                format!("command_prefix '{}' contains whitespace", self.command_prefix),
            );
        }

        if self.scoring.win < self.scoring.loss {
            warn(
                WarnLevel::Warning,
                format!(
                    "scoring.win ({}) is lower than scoring.loss ({})",
                    self.scoring.win, self.scoring.loss
                ),
            );
        }
        if self.scoring.draw > self.scoring.win {
            warn(
                WarnLevel::Warning,
                format!(
                    "scoring.draw ({}) is higher than scoring.win ({})",
                    self.scoring.draw, self.scoring.win
                ),
            );
        }

        if self.initial_budget <= 0 {
            warn(
                WarnLevel::Warning,
                format!(
                    "initial_budget is {}; every roster addition will overspend",
                    self.initial_budget
                ),
            );
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
