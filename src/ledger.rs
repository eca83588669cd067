//! Player records and best-score bookkeeping over a `GameRepo`.
//!
//! Best scores only move up: the raise itself is delegated to the store's
//! conditional write so concurrent submissions cannot lower a stored best.

use tracing::{info, instrument, warn};

use crate::domain::{LeaderboardEntry, Player, ScoreUpdateResult};
use crate::error::{GameError, RepoError};
use crate::store::GameRepo;
use crate::util::{new_referral_code, normalize_player_name, trunc_for_log, validate_player_name};

pub const REFERRAL_CODE_ATTEMPTS: usize = 5;

/// Insert a player, regenerating the referral code when the store reports a collision.
async fn create_with_fresh_code<G>(
  repo: &dyn GameRepo,
  name: &str,
  best_score: i64,
  mut next_code: G,
) -> Result<Player, GameError>
where
  G: FnMut() -> String + Send,
{
  for attempt in 1..=REFERRAL_CODE_ATTEMPTS {
    let code = next_code();
    match repo.create_player(name, &code, best_score).await {
      Err(RepoError::DuplicateCode(_)) => {
        warn!(target: "ledger", %name, attempt, "Referral code collision; regenerating");
      }
      other => return other.map_err(GameError::from),
    }
  }
  Err(GameError::DuplicateCode)
}

#[instrument(level = "info", skip(repo, player_name), fields(name = %trunc_for_log(player_name, 60)))]
pub async fn register_player(repo: &dyn GameRepo, player_name: &str) -> Result<Player, GameError> {
  let name = validate_player_name(player_name)?;
  if repo.find_player_by_name(&name).await?.is_some() {
    return Err(GameError::DuplicateName(name));
  }
  let player = create_with_fresh_code(repo, &name, 0, new_referral_code).await?;
  info!(target: "ledger", id = player.id, name = %player.player_name, "Player registered");
  Ok(player)
}

#[instrument(level = "info", skip(repo, player_name), fields(name = %trunc_for_log(player_name, 60)))]
pub async fn submit_score(
  repo: &dyn GameRepo,
  player_name: &str,
  score: i64,
) -> Result<ScoreUpdateResult, GameError> {
  let name = normalize_player_name(player_name);
  if name.is_empty() {
    return Err(GameError::InvalidName("player name must not be empty".into()));
  }

  let existing = match repo.find_player_by_name(name).await? {
    Some(p) => p,
    None => match create_with_fresh_code(repo, name, score, new_referral_code).await {
      Ok(p) => {
        info!(target: "ledger", id = p.id, %name, score, "Player created from score submission");
        return Ok(ScoreUpdateResult { player_name: p.player_name, best_score: p.best_score, is_personal_best: true });
      }
      // Another submission created the player first; fall through to the raise.
      Err(GameError::DuplicateName(_)) => repo
        .find_player_by_name(name)
        .await?
        .ok_or_else(|| GameError::PlayerNotFound(name.to_string()))?,
      Err(e) => return Err(e),
    },
  };

  let (stored, raised) = repo.update_player_best_score(existing.id, score).await?;
  info!(target: "ledger", id = stored.id, score, best = stored.best_score, personal_best = raised, "Score submitted");
  Ok(ScoreUpdateResult {
    player_name: stored.player_name,
    best_score: stored.best_score,
    is_personal_best: raised,
  })
}

#[instrument(level = "debug", skip(repo, player_name), fields(name = %trunc_for_log(player_name, 60)))]
pub async fn player_by_name(repo: &dyn GameRepo, player_name: &str) -> Result<Player, GameError> {
  let name = normalize_player_name(player_name);
  repo
    .find_player_by_name(name)
    .await?
    .ok_or_else(|| GameError::PlayerNotFound(name.to_string()))
}

#[instrument(level = "debug", skip(repo))]
pub async fn player_by_code(repo: &dyn GameRepo, referral_code: &str) -> Result<Player, GameError> {
  repo
    .find_player_by_referral_code(referral_code)
    .await?
    .ok_or_else(|| GameError::PlayerNotFound(referral_code.to_string()))
}

#[instrument(level = "debug", skip(repo))]
pub async fn leaderboard(repo: &dyn GameRepo, limit: usize) -> Result<Vec<LeaderboardEntry>, GameError> {
  let top = repo.top_players(limit).await?;
  Ok(top.iter().map(LeaderboardEntry::from).collect())
}
