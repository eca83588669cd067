//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; failures map to a status code plus `{ "detail": ... }`,
//! including requests the extractors reject before a handler runs.

use std::sync::Arc;
use axum::{
  extract::{
    rejection::{JsonRejection, PathRejection, QueryRejection},
    FromRequest, FromRequestParts, State,
  },
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{error, instrument, warn};

use crate::domain::{LeaderboardEntry, Player, QuizQuestion, ScoreUpdateResult};
use crate::error::GameError;
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;
use crate::util::trunc_for_log;

pub enum ApiError {
  Game(GameError),
  /// Extractor rejection: malformed body, path, or query string.
  Rejected { status: StatusCode, detail: String },
}

impl From<GameError> for ApiError {
  fn from(e: GameError) -> Self { ApiError::Game(e) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::Rejected { status: r.status(), detail: r.body_text() } }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::Rejected { status: r.status(), detail: r.body_text() } }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::Rejected { status: r.status(), detail: r.body_text() } }
}

/// `Json` whose rejection renders as `ErrorOut`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

pub fn status_for(e: &GameError) -> StatusCode {
  match e {
    GameError::NoLocations => StatusCode::SERVICE_UNAVAILABLE,
    GameError::DuplicateName(_) | GameError::InvalidName(_) | GameError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
    GameError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
    GameError::EmptyHints { .. }
    | GameError::EmptyFacts { .. }
    | GameError::EmptyTrivia { .. }
    | GameError::DuplicateCode
    | GameError::Repo(_) => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, detail) = match self {
      ApiError::Game(e) => {
        let status = status_for(&e);
        let detail = if e.is_client_error() || status == StatusCode::SERVICE_UNAVAILABLE {
          warn!(target: "geoquiz", kind = e.kind(), error = %e, "Request rejected");
          e.to_string()
        } else {
          error!(target: "geoquiz", kind = e.kind(), error = %e, "Request failed");
          "Internal error".to_string()
        };
        (status, detail)
      }
      ApiError::Rejected { status, detail } => {
        warn!(target: "geoquiz", %status, %detail, "Request malformed");
        (status, detail)
      }
    };
    (status, Json(ErrorOut { detail })).into_response()
  }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_question(State(state): State<Arc<AppState>>) -> ApiResult<QuizQuestion> {
  Ok(Json(logic::new_question(&state).await?))
}

#[instrument(level = "info")]
pub async fn http_verify_answer(ApiPath((question_id, answer_id)): ApiPath<(i64, i64)>) -> Json<VerifyOut> {
  Json(VerifyOut { is_correct: logic::check_answer(question_id, answer_id) })
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_register_player(
  State(state): State<Arc<AppState>>,
  ApiJson(body): ApiJson<PlayerCreate>,
) -> ApiResult<Player> {
  Ok(Json(logic::register(&state, &body.player_name).await?))
}

#[instrument(level = "info", skip(state, player_name), fields(name = %trunc_for_log(&player_name, 60)))]
pub async fn http_player_by_name(
  State(state): State<Arc<AppState>>,
  ApiPath(player_name): ApiPath<String>,
) -> ApiResult<Player> {
  Ok(Json(logic::player_by_name(&state, &player_name).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_player_by_code(
  State(state): State<Arc<AppState>>,
  ApiPath(referral_code): ApiPath<String>,
) -> ApiResult<Player> {
  Ok(Json(logic::player_by_code(&state, &referral_code).await?))
}

#[instrument(level = "info", skip(state, body), fields(score = body.score))]
pub async fn http_submit_score(
  State(state): State<Arc<AppState>>,
  ApiJson(body): ApiJson<ScoreUpdate>,
) -> ApiResult<ScoreUpdateResult> {
  Ok(Json(logic::submit_score(&state, &body.player_name, body.score).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_leaderboard(
  State(state): State<Arc<AppState>>,
  ApiQuery(q): ApiQuery<LeaderboardQuery>,
) -> ApiResult<Vec<LeaderboardEntry>> {
  Ok(Json(logic::leaderboard(&state, q.limit).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_locations(State(state): State<Arc<AppState>>) -> ApiResult<LocationsOut> {
  Ok(Json(logic::list_locations(&state).await?))
}
