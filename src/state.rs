//! Application state: the repository handle and leaderboard settings.
//!
//! The location catalog comes from the TOML bank when it has valid entries,
//! otherwise from the built-in seeds.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::{load_game_config_from_env, GameConfig, LeaderboardCfg};
use crate::seeds::sample_locations;
use crate::store::{GameRepo, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn GameRepo>,
    pub leaderboard: LeaderboardCfg,
}

impl AppState {
    /// Build state from env: load config, pick the catalog, seed the store.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Self {
        let cfg = load_game_config_from_env().unwrap_or_default();
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: GameConfig) -> Self {
        let bank = cfg.valid_locations();
        let catalog = if bank.is_empty() {
            if !cfg.locations.is_empty() {
                warn!(target: "geoquiz", "No valid bank locations; using built-in catalog");
            }
            sample_locations()
        } else {
            bank
        };
        info!(target: "geoquiz", locations = catalog.len(), default_limit = cfg.leaderboard.default_limit, "Startup location inventory");

        Self::with_repo(Arc::new(MemoryStore::with_locations(catalog)), cfg.leaderboard)
    }

    pub fn with_repo(repo: Arc<dyn GameRepo>, leaderboard: LeaderboardCfg) -> Self {
        Self { repo, leaderboard }
    }
}
