//! # Change Feed Route
//!
//! WebSocket endpoint forwarding row-change signals to connected clients.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      /api/events (WebSocket)                            │
//! │                                                                         │
//! │  server ──► {"entity":"sales"}          on every sales mutation        │
//! │  server ──► {"entity":"catalog_items"}  on every catalog mutation      │
//! │                                                                         │
//! │  Payloads carry no row data; the client re-fetches the list it shows.  │
//! │  Delivery is best-effort and at-least-once from the client's view: a   │
//! │  client that just issued a write still receives the echo for it.       │
//! │  Client → server messages are ignored.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

/// GET /api/events → WebSocket upgrade.
pub async fn subscribe(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| forward_changes(socket, state))
}

/// Forwards change events to one client until either side goes away.
async fn forward_changes(mut socket: WebSocket, state: AppState) {
    let mut changes = state.db.subscribe_changes();
    debug!("change feed subscriber connected");

    loop {
        tokio::select! {
            change = changes.recv() => match change {
                Ok(event) => {
                    let payload = match serde_json::to_string(&event) {
                        Ok(payload) => payload,
                        Err(e) => {
                            warn!(error = %e, "failed to encode change event");
                            continue;
                        }
                    };
                    if socket.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    // The client missed signals; it should re-fetch anyway on
                    // the next one, so just keep going.
                    warn!(missed, "change feed subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                // Inbound messages (including pings, which axum answers
                // automatically) carry no meaning on this channel.
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }

    debug!("change feed subscriber disconnected");
}
