//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Domain payloads (`QuizQuestion`, `Player`, ...) serialize as-is; this module
//! only adds request bodies, small wrappers, and the WebSocket envelopes.

use serde::{Deserialize, Serialize};

use crate::domain::{LeaderboardEntry, Location, Player, QuizQuestion, ScoreUpdateResult};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewQuestion,
    VerifyAnswer {
        question_id: i64,
        answer_id: i64,
    },
    RegisterPlayer {
        player_name: String,
    },
    GetPlayer {
        #[serde(default)]
        player_name: Option<String>,
        #[serde(default)]
        referral_code: Option<String>,
    },
    SubmitScore {
        player_name: String,
        score: i64,
    },
    Leaderboard {
        #[serde(default)]
        limit: Option<usize>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Question {
        question: QuizQuestion,
    },
    AnswerResult {
        is_correct: bool,
    },
    Player {
        player: Player,
    },
    ScoreResult {
        result: ScoreUpdateResult,
    },
    Leaderboard {
        entries: Vec<LeaderboardEntry>,
    },
    Error {
        kind: &'static str,
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct PlayerCreate {
    pub player_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreUpdate {
    pub player_name: String,
    pub score: i64,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyOut {
    pub is_correct: bool,
}

/// Full location dump for the admin listing.
pub type LocationsOut = Vec<Location>;

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub detail: String,
}
