//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::error::GameError;
use crate::logic;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "geoquiz", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "geoquiz", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "geoquiz", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { kind: "invalid_json", message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "kind": "serialization", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "geoquiz", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "geoquiz", "WebSocket disconnected");
}

fn to_ws_error(e: GameError) -> ServerWsMessage {
  ServerWsMessage::Error { kind: e.kind(), message: e.to_string() }
}

#[instrument(level = "info", skip(state))]
pub async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  let reply = match msg {
    ClientWsMessage::Ping => Ok(ServerWsMessage::Pong),

    ClientWsMessage::NewQuestion => logic::new_question(state)
      .await
      .map(|question| ServerWsMessage::Question { question }),

    ClientWsMessage::VerifyAnswer { question_id, answer_id } => Ok(ServerWsMessage::AnswerResult {
      is_correct: logic::check_answer(question_id, answer_id),
    }),

    ClientWsMessage::RegisterPlayer { player_name } => logic::register(state, &player_name)
      .await
      .map(|player| ServerWsMessage::Player { player }),

    ClientWsMessage::GetPlayer { player_name, referral_code } => {
      let found = match (player_name, referral_code) {
        (Some(name), _) => logic::player_by_name(state, &name).await,
        (None, Some(code)) => logic::player_by_code(state, &code).await,
        (None, None) => Err(GameError::InvalidRequest("player_name or referral_code required".into())),
      };
      found.map(|player| ServerWsMessage::Player { player })
    }

    ClientWsMessage::SubmitScore { player_name, score } => logic::submit_score(state, &player_name, score)
      .await
      .map(|result| ServerWsMessage::ScoreResult { result }),

    ClientWsMessage::Leaderboard { limit } => logic::leaderboard(state, limit)
      .await
      .map(|entries| ServerWsMessage::Leaderboard { entries }),
  };
  reply.unwrap_or_else(to_ws_error)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::GameConfig;

  #[tokio::test]
  async fn messages_dispatch_to_core() {
    let state = AppState::from_config(GameConfig::default());

    let reply = handle_client_ws(ClientWsMessage::SubmitScore { player_name: "Wes".into(), score: 9 }, &state).await;
    assert!(matches!(reply, ServerWsMessage::ScoreResult { ref result } if result.is_personal_best));

    let reply = handle_client_ws(ClientWsMessage::RegisterPlayer { player_name: "Wes".into() }, &state).await;
    assert!(matches!(reply, ServerWsMessage::Error { kind: "duplicate_name", .. }));

    let reply = handle_client_ws(ClientWsMessage::GetPlayer { player_name: None, referral_code: None }, &state).await;
    assert!(matches!(reply, ServerWsMessage::Error { kind: "invalid_request", .. }));

    let reply = handle_client_ws(ClientWsMessage::NewQuestion, &state).await;
    match reply {
      ServerWsMessage::Question { question } => assert!(question.options.iter().any(|o| o.id == question.correct_id)),
      other => panic!("unexpected reply: {other:?}"),
    }
  }
}
