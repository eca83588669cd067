//! Loading game configuration (leaderboard limits + optional location bank) from TOML.
//!
//! See `GameConfig` and `LeaderboardCfg` for expected schema.

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::NewLocation;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GameConfig {
  #[serde(default)]
  pub leaderboard: LeaderboardCfg,
  #[serde(default)]
  pub locations: Vec<NewLocation>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LeaderboardCfg {
  pub default_limit: usize,
  pub max_limit: usize,
}

impl Default for LeaderboardCfg {
  fn default() -> Self {
    Self { default_limit: 10, max_limit: 100 }
  }
}

impl LeaderboardCfg {
  /// Requested limit, or the default, clamped to `1..=max_limit`.
  pub fn effective_limit(&self, requested: Option<usize>) -> usize {
    requested.unwrap_or(self.default_limit).clamp(1, self.max_limit.max(1))
  }
}

impl GameConfig {
  /// Bank entries that satisfy the location invariants; the rest are logged and dropped.
  pub fn valid_locations(&self) -> Vec<NewLocation> {
    self
      .locations
      .iter()
      .filter(|l| match l.missing_field() {
        None => true,
        Some(field) => {
          error!(target: "geoquiz", name = %l.location_name, %field, "Skipping bank location: missing field.");
          false
        }
      })
      .cloned()
      .collect()
  }
}

pub fn parse_config(s: &str) -> Result<GameConfig, toml::de::Error> {
  toml::from_str::<GameConfig>(s)
}

/// Attempt to load `GameConfig` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_game_config_from_env() -> Option<GameConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "geoquiz", %path, locations = cfg.locations.len(), "Loaded game config (TOML)");
        if cfg.leaderboard.default_limit > cfg.leaderboard.max_limit {
          warn!(target: "geoquiz", default_limit = cfg.leaderboard.default_limit, max_limit = cfg.leaderboard.max_limit, "Leaderboard default exceeds max; it will be clamped");
        }
        Some(cfg)
      }
      Err(e) => {
        error!(target: "geoquiz", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "geoquiz", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
