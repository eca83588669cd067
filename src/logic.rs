//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! Each operation acquires what it needs from the repository, runs the quiz or
//! ledger logic, and returns a typed result. Transport mapping lives in `routes`.

use tracing::{info, instrument};

use crate::domain::{LeaderboardEntry, Location, Player, QuizQuestion, ScoreUpdateResult};
use crate::error::GameError;
use crate::ledger;
use crate::quiz::{generate_question, verify_answer};
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(state))]
pub async fn new_question(state: &AppState) -> Result<QuizQuestion, GameError> {
  let locations = state.repo.list_all_locations().await?;
  let q = generate_question(&locations, &mut rand::thread_rng())?;
  info!(target: "quiz", id = q.id, options = q.options.len(), "Question served");
  Ok(q)
}

pub fn check_answer(question_id: i64, answer_id: i64) -> bool {
  let ok = verify_answer(question_id, answer_id);
  info!(target: "quiz", question_id, answer_id, correct = ok, "Answer verified");
  ok
}

#[instrument(level = "info", skip(state, player_name), fields(name = %trunc_for_log(player_name, 60)))]
pub async fn register(state: &AppState, player_name: &str) -> Result<Player, GameError> {
  ledger::register_player(state.repo.as_ref(), player_name).await
}

pub async fn player_by_name(state: &AppState, player_name: &str) -> Result<Player, GameError> {
  ledger::player_by_name(state.repo.as_ref(), player_name).await
}

pub async fn player_by_code(state: &AppState, referral_code: &str) -> Result<Player, GameError> {
  ledger::player_by_code(state.repo.as_ref(), referral_code).await
}

#[instrument(level = "info", skip(state, player_name), fields(name = %trunc_for_log(player_name, 60)))]
pub async fn submit_score(state: &AppState, player_name: &str, score: i64) -> Result<ScoreUpdateResult, GameError> {
  ledger::submit_score(state.repo.as_ref(), player_name, score).await
}

#[instrument(level = "info", skip(state))]
pub async fn leaderboard(state: &AppState, limit: Option<usize>) -> Result<Vec<LeaderboardEntry>, GameError> {
  let limit = state.leaderboard.effective_limit(limit);
  ledger::leaderboard(state.repo.as_ref(), limit).await
}

pub async fn list_locations(state: &AppState) -> Result<Vec<Location>, GameError> {
  Ok(state.repo.list_all_locations().await?)
}
