//! WebSocket upgrade + session loop. Each connection owns one quiz controller
//! and one clock. Client messages and clock ticks both produce a snapshot.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::clock::GameClock;
use crate::controller::QuizController;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::util::trunc_for_log;

enum Wake {
  Frame(Option<Result<Message, axum::Error>>),
  Tick(Uuid),
}

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "flagquiz_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "flagquiz_backend", "WebSocket connected");
  let mut controller = QuizController::new(state.settings.clone());
  let mut clock = GameClock::new();

  loop {
    let wake = tokio::select! {
      frame = socket.recv() => Wake::Frame(frame),
      id = clock.tick() => Wake::Tick(id),
    };

    let reply = match wake {
      Wake::Frame(Some(Ok(Message::Text(txt)))) => match serde_json::from_str::<ClientMessage>(&txt) {
        Ok(incoming) => {
          debug!(target: "flagquiz_backend", "WS received: {:?}", &incoming);
          controller.handle(incoming)
        }
        Err(e) => {
          warn!(target: "flagquiz_backend", payload = %trunc_for_log(&txt, 120), error = %e, "WS invalid JSON");
          ServerMessage::Error { message: format!("Invalid JSON: {}", e) }
        }
      },
      Wake::Frame(Some(Ok(Message::Ping(payload)))) => {
        let _ = socket.send(Message::Pong(payload)).await;
        continue;
      }
      Wake::Frame(Some(Ok(Message::Close(_)))) | Wake::Frame(None) => break,
      Wake::Frame(Some(Err(e))) => {
        error!(target: "flagquiz_backend", error = %e, "WS receive error");
        break;
      }
      Wake::Frame(Some(Ok(_))) => continue,
      Wake::Tick(id) => match controller.on_tick(id) {
        Some(reply) => reply,
        None => {
          clock.sync(controller.session());
          continue;
        }
      },
    };

    clock.sync(controller.session());

    let out = serde_json::to_string(&reply).unwrap_or_else(|e| {
      serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
    });

    if let Err(e) = socket.send(Message::Text(out)).await {
      error!(target: "flagquiz_backend", error = %e, "WS send error");
      break;
    }
  }

  clock.disarm();
  info!(target: "flagquiz_backend", session = ?controller.session().id(), "WebSocket disconnected");
}
