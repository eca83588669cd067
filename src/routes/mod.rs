//! Router assembly: HTTP endpoints, WebSocket upgrade, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - quiz, player, leaderboard, and admin endpoints under `/api/...`
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/health", get(http::http_health))
        .route("/api/quiz/question", get(http::http_get_question))
        .route("/api/quiz/verify/:question_id/:answer_id", get(http::http_verify_answer))
        .route("/api/players", post(http::http_register_player))
        .route("/api/players/name/:player_name", get(http::http_player_by_name))
        .route("/api/players/code/:referral_code", get(http::http_player_by_code))
        .route("/api/players/score", put(http::http_submit_score))
        .route("/api/leaderboard", get(http::http_leaderboard))
        .route("/api/admin/locations", get(http::http_list_locations))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::GameConfig;
    use crate::domain::{Location, NewLocation, Player};
    use crate::error::RepoError;
    use crate::store::{GameRepo, MemoryStore};

    /// Store whose backend is always unreachable.
    struct DownStore;

    #[async_trait::async_trait]
    impl GameRepo for DownStore {
        async fn list_all_locations(&self) -> Result<Vec<Location>, RepoError> {
            Err(RepoError::Unavailable("connection refused".into()))
        }
        async fn find_player_by_name(&self, _name: &str) -> Result<Option<Player>, RepoError> {
            Err(RepoError::Unavailable("connection refused".into()))
        }
        async fn find_player_by_referral_code(&self, _code: &str) -> Result<Option<Player>, RepoError> {
            Err(RepoError::Unavailable("connection refused".into()))
        }
        async fn create_player(&self, _name: &str, _code: &str, _best: i64) -> Result<Player, RepoError> {
            Err(RepoError::Unavailable("connection refused".into()))
        }
        async fn update_player_best_score(&self, _id: i64, _score: i64) -> Result<(Player, bool), RepoError> {
            Err(RepoError::Unavailable("connection refused".into()))
        }
        async fn top_players(&self, _limit: usize) -> Result<Vec<Player>, RepoError> {
            Err(RepoError::Unavailable("connection refused".into()))
        }
    }

    fn app_with(repo: Arc<dyn GameRepo>) -> Router {
        build_router(Arc::new(AppState::with_repo(repo, Default::default())))
    }

    fn app() -> Router {
        build_router(Arc::new(AppState::from_config(GameConfig::default())))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn question_and_verify() {
        let app = app();
        let (status, q) = call(&app, Method::GET, "/api/quiz/question", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(q["options"].as_array().unwrap().len(), 4);
        assert_eq!(q["hints"].as_array().unwrap().len(), 2);
        let id = q["correct_id"].as_i64().unwrap();

        let (_, v) = call(&app, Method::GET, &format!("/api/quiz/verify/{id}/{id}"), None).await;
        assert_eq!(v, json!({ "is_correct": true }));
        let (_, v) = call(&app, Method::GET, &format!("/api/quiz/verify/{id}/{}", id + 100), None).await;
        assert_eq!(v, json!({ "is_correct": false }));
    }

    #[tokio::test]
    async fn empty_catalog_is_service_unavailable() {
        let state = AppState::with_repo(Arc::new(MemoryStore::new()), Default::default());
        let app = build_router(Arc::new(state));
        let (status, body) = call(&app, Method::GET, "/api/quiz/question", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn player_lifecycle() {
        let app = app();
        let (status, p) = call(&app, Method::POST, "/api/players", Some(json!({ "player_name": "Alice" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(p["best_score"], 0);
        let code = p["referral_code"].as_str().unwrap().to_string();

        let (status, _) = call(&app, Method::POST, "/api/players", Some(json!({ "player_name": "Alice" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&app, Method::POST, "/api/players", Some(json!({ "player_name": "Al" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let score = json!({ "player_name": "Alice", "score": 50 });
        let (_, r) = call(&app, Method::PUT, "/api/players/score", Some(score)).await;
        assert_eq!(r, json!({ "player_name": "Alice", "best_score": 50, "is_personal_best": true }));

        let score = json!({ "player_name": "Alice", "score": 30 });
        let (_, r) = call(&app, Method::PUT, "/api/players/score", Some(score)).await;
        assert_eq!(r, json!({ "player_name": "Alice", "best_score": 50, "is_personal_best": false }));

        let (status, by_code) = call(&app, Method::GET, &format!("/api/players/code/{code}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_code["player_name"], "Alice");

        let (status, by_name) = call(&app, Method::GET, "/api/players/name/Alice", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_name["best_score"], 50);

        let (status, _) = call(&app, Method::GET, "/api/players/name/Nobody", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn leaderboard_and_admin_listing() {
        let app = app();
        for (name, score) in [("p10", 10), ("p90a", 90), ("p40", 40), ("p90b", 90)] {
            let body = json!({ "player_name": name, "score": score });
            call(&app, Method::PUT, "/api/players/score", Some(body)).await;
        }
        let (status, lb) = call(&app, Method::GET, "/api/leaderboard?limit=3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            lb,
            json!([
                { "player_name": "p90a", "best_score": 90 },
                { "player_name": "p90b", "best_score": 90 },
                { "player_name": "p40", "best_score": 40 },
            ])
        );

        let (_, locations) = call(&app, Method::GET, "/api/admin/locations", None).await;
        let locations = locations.as_array().unwrap();
        assert_eq!(locations.len(), 5);
        assert!(locations[0]["knowledge_bits"].is_array());
    }

    #[tokio::test]
    async fn broken_catalog_entry_is_an_internal_error() {
        let no_facts = NewLocation {
            location_name: "Atlantis".into(),
            nation: "Unknown".into(),
            hints: vec!["Sunk beneath the waves".into()],
            interesting_facts: vec![],
            knowledge_bits: vec!["Described by Plato".into()],
        };
        let app = app_with(Arc::new(MemoryStore::with_locations(vec![no_facts])));
        let (status, body) = call(&app, Method::GET, "/api/quiz/question", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Internal error" }));
    }

    #[tokio::test]
    async fn unreachable_store_is_an_internal_error() {
        let app = app_with(Arc::new(DownStore));
        for (method, uri, body) in [
            (Method::GET, "/api/quiz/question", None),
            (Method::GET, "/api/leaderboard", None),
            (Method::GET, "/api/players/name/Alice", None),
            (Method::PUT, "/api/players/score", Some(json!({ "player_name": "Alice", "score": 1 }))),
        ] {
            let (status, out) = call(&app, method, uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(out, json!({ "detail": "Internal error" }), "{uri}");
        }
    }

    #[tokio::test]
    async fn malformed_requests_get_json_detail() {
        let app = app();

        let (status, body) = call(&app, Method::GET, "/api/leaderboard?limit=-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let (status, body) = call(&app, Method::GET, "/api/quiz/verify/abc/1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let (status, body) = call(&app, Method::PUT, "/api/players/score", Some(json!({ "player_name": "Alice" }))).await;
        assert!(status.is_client_error());
        assert!(body["detail"].is_string());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/players")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn padded_name_lookup_finds_registered_player() {
        let app = app();
        let (status, _) = call(&app, Method::POST, "/api/players", Some(json!({ "player_name": "  Bob  " }))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, p) = call(&app, Method::GET, "/api/players/name/%20%20Bob%20%20", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(p["player_name"], "Bob");
    }
}
