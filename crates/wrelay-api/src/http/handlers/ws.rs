//! WebSocket handler for the streaming widget transport.
//!
//! The `/ws` endpoint upgrades an HTTP connection to a WebSocket. Each text
//! frame from the client is the user's message; the handler answers with
//! exactly one text frame holding the provider's reply. Frames carry raw
//! text only: no envelope, no acknowledgement.
//!
//! Nothing is persisted on this path. When the provider fails, the failure is
//! logged and no frame is sent for that message; the socket stays open.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;

use crate::state::AppState;

/// Upgrade an HTTP request to a WebSocket connection.
///
/// This is mounted at `/ws` in the router.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Serve one connection until the client goes away.
async fn handle_ws_connection(mut socket: WebSocket, state: AppState) {
    tracing::info!("New client connected");

    while let Some(msg_result) = socket.recv().await {
        match msg_result {
            Ok(Message::Text(text)) => {
                tracing::debug!(received = %text.as_str(), "WebSocket message");

                match state.relay_service.quick_reply(Some(text.as_str())).await {
                    Ok(reply) => {
                        if socket.send(Message::Text(reply.into())).await.is_err() {
                            // Client disconnected
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "No reply sent for WebSocket message");
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Err(err) => {
                tracing::debug!("WebSocket receive error: {err}");
                break;
            }
            // Ignore binary, ping, pong protocol frames (handled by axum/tungstenite)
            Ok(_) => {}
        }
    }

    tracing::info!("Client disconnected");
}
