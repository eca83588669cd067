//! Repository port and its in-memory implementation.
//!
//! The core only talks to `GameRepo`. `MemoryStore` keeps locations and players
//! behind tokio `RwLock`s; every player mutation happens under a single write
//! lock so uniqueness checks and the best-score raise are atomic.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::{Location, NewLocation, Player};
use crate::error::RepoError;

#[async_trait]
pub trait GameRepo: Send + Sync {
    async fn list_all_locations(&self) -> Result<Vec<Location>, RepoError>;
    async fn find_player_by_name(&self, name: &str) -> Result<Option<Player>, RepoError>;
    async fn find_player_by_referral_code(&self, code: &str) -> Result<Option<Player>, RepoError>;
    async fn create_player(
        &self,
        name: &str,
        referral_code: &str,
        best_score: i64,
    ) -> Result<Player, RepoError>;
    /// Conditional raise: stores `new_score` only if it is strictly higher than
    /// the current best. Returns the player as stored after the call and
    /// whether the write was applied.
    async fn update_player_best_score(
        &self,
        player_id: i64,
        new_score: i64,
    ) -> Result<(Player, bool), RepoError>;
    /// Highest best scores first; ties ordered by player id ascending.
    async fn top_players(&self, limit: usize) -> Result<Vec<Player>, RepoError>;
}

#[derive(Default)]
struct PlayerTable {
    next_id: i64,
    by_id: BTreeMap<i64, Player>,
    by_name: HashMap<String, i64>,
    by_code: HashMap<String, i64>,
}

#[derive(Default)]
pub struct MemoryStore {
    locations: RwLock<Vec<Location>>,
    players: RwLock<PlayerTable>,
}

impl MemoryStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the given catalog; ids are assigned from 1.
    pub fn with_locations(locations: Vec<NewLocation>) -> Self {
        Self {
            locations: RwLock::new(number_locations(locations)),
            players: RwLock::default(),
        }
    }
}

fn number_locations(locations: Vec<NewLocation>) -> Vec<Location> {
    locations
        .into_iter()
        .zip(1..)
        .map(|(l, id)| l.with_id(id))
        .collect()
}

#[async_trait]
impl GameRepo for MemoryStore {
    async fn list_all_locations(&self) -> Result<Vec<Location>, RepoError> {
        Ok(self.locations.read().await.clone())
    }

    async fn find_player_by_name(&self, name: &str) -> Result<Option<Player>, RepoError> {
        let table = self.players.read().await;
        Ok(table.by_name.get(name).and_then(|id| table.by_id.get(id)).cloned())
    }

    async fn find_player_by_referral_code(&self, code: &str) -> Result<Option<Player>, RepoError> {
        let table = self.players.read().await;
        Ok(table.by_code.get(code).and_then(|id| table.by_id.get(id)).cloned())
    }

    #[instrument(level = "debug", skip(self))]
    async fn create_player(
        &self,
        name: &str,
        referral_code: &str,
        best_score: i64,
    ) -> Result<Player, RepoError> {
        let mut table = self.players.write().await;
        if table.by_name.contains_key(name) {
            return Err(RepoError::DuplicateName(name.to_string()));
        }
        if table.by_code.contains_key(referral_code) {
            return Err(RepoError::DuplicateCode(referral_code.to_string()));
        }
        table.next_id += 1;
        let player = Player {
            id: table.next_id,
            player_name: name.to_string(),
            referral_code: referral_code.to_string(),
            best_score,
        };
        table.by_name.insert(player.player_name.clone(), player.id);
        table.by_code.insert(player.referral_code.clone(), player.id);
        table.by_id.insert(player.id, player.clone());
        debug!(target: "ledger", id = player.id, "Player row inserted");
        Ok(player)
    }

    async fn update_player_best_score(
        &self,
        player_id: i64,
        new_score: i64,
    ) -> Result<(Player, bool), RepoError> {
        let mut table = self.players.write().await;
        let player = table
            .by_id
            .get_mut(&player_id)
            .ok_or(RepoError::PlayerNotFound(player_id))?;
        let raised = new_score > player.best_score;
        if raised {
            player.best_score = new_score;
        }
        Ok((player.clone(), raised))
    }

    async fn top_players(&self, limit: usize) -> Result<Vec<Player>, RepoError> {
        let table = self.players.read().await;
        let mut players: Vec<Player> = table.by_id.values().cloned().collect();
        players.sort_by(|a, b| b.best_score.cmp(&a.best_score).then(a.id.cmp(&b.id)));
        players.truncate(limit);
        Ok(players)
    }
}
