use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Deserialize;
use tokio::sync::broadcast;

use super::AppState;
use crate::session::Session;
use crate::worksheet::Cell;

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side; clients only see a generic message.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

// ============================================================
// Bootstrap page
// ============================================================

/// The console bootstrap page: loads every configured plugin's scripts and
/// advertises the frontend module names for the notebook framework to wire up.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut modules = Vec::new();
    let mut scripts = String::new();
    for plugin in state.plugins.iter() {
        modules.push(plugin.frontend_module);
        for js in plugin.js_files {
            scripts.push_str(&format!("  <script src=\"{js}\"></script>\n"));
        }
    }

    Html(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         \x20 <title>Memory Forensics Web Console</title>\n\
         {scripts}\
         </head>\n\
         <body data-modules=\"{}\">\n\
         </body>\n\
         </html>\n",
        modules.join(" ")
    ))
}

// ============================================================
// Worksheet
// ============================================================

pub async fn get_worksheet(
    State(state): State<AppState>,
) -> Result<Json<Vec<Cell>>, (StatusCode, String)> {
    state.worksheet.read_cells().map(Json).map_err(internal_error)
}

#[derive(Debug, Deserialize)]
pub struct AppendCellInput {
    pub kind: String,
    pub source: String,
}

pub async fn append_cell(
    State(state): State<AppState>,
    Json(input): Json<AppendCellInput>,
) -> Result<(StatusCode, Json<Cell>), (StatusCode, String)> {
    let supported = state
        .plugins
        .iter()
        .any(|p| p.content_type == Some(input.kind.as_str()));
    if !supported {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("No plugin handles cell type '{}'", input.kind),
        ));
    }

    let cell = Cell::new(input.kind, input.source);
    state.worksheet.append_cell(&cell).map_err(internal_error)?;

    // A send error only means no live console is subscribed right now.
    let record = serde_json::to_string(&cell).map_err(internal_error)?;
    let _ = state.events.send(record);

    Ok((StatusCode::CREATED, Json(cell)))
}

// ============================================================
// Session
// ============================================================

pub async fn get_session(State(state): State<AppState>) -> Json<Session> {
    Json((*state.session).clone())
}

// ============================================================
// Live events
// ============================================================

/// Upgrade to a WebSocket that streams cell-append notifications. The
/// protocol spoken on top of the stream belongs to the notebook frontend.
pub async fn live_events(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let events = state.events.subscribe();
    ws.on_upgrade(move |socket| forward_events(socket, events))
}

async fn forward_events(mut socket: WebSocket, mut events: broadcast::Receiver<String>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if socket.send(Message::Text(event.into())).await.is_err() {
                    // Client went away.
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!("WebSocket subscriber lagged, skipped {} events", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
