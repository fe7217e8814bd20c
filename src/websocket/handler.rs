//! WebSocket handler for client connections
//!
//! Handles the upgrade, the in-band authentication handshake, connection
//! lifecycle, and message forwarding. A connection is only registered after
//! its first frame carried a valid session token for an active account.

use axum::extract::ws::{Message, WebSocket};
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use futures::stream::{SplitSink, SplitStream};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::auth::Principal;
use crate::gateway::state::AppState;
use crate::messages::{ClientFrame, WsEvent};

/// How long a fresh connection has to present its auth frame
const HANDSHAKE_DEADLINE: Duration = Duration::from_secs(10);

/// WebSocket upgrade handler
///
/// Endpoint: GET /ws - authentication happens in-band, not via query string.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn send_event(sender: &mut SplitSink<WebSocket, Message>, event: &WsEvent) {
    if let Ok(json) = serde_json::to_string(event) {
        let _ = sender.send(Message::Text(json.into())).await;
    }
}

/// Run the handshake: first text frame must be an auth frame with a token
/// that resolves to an active account.
async fn perform_handshake(
    receiver: &mut SplitStream<WebSocket>,
    state: &AppState,
) -> Result<Principal, &'static str> {
    let frame = match timeout(HANDSHAKE_DEADLINE, receiver.next()).await {
        Ok(Some(Ok(Message::Text(text)))) => text,
        Ok(Some(Ok(_))) => return Err("Expected auth frame"),
        Ok(_) => return Err("Connection closed before auth"),
        Err(_) => return Err("Auth handshake timed out"),
    };

    let parsed: ClientFrame =
        serde_json::from_str(&frame).map_err(|_| "Malformed auth frame")?;
    let token = match parsed {
        ClientFrame::Auth { token } => token,
        ClientFrame::Ping => return Err("Expected auth frame"),
    };

    state
        .auth
        .authenticate(&token)
        .await
        .map_err(|_| "Authentication failed")
}

/// Handle WebSocket connection lifecycle
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let principal = match perform_handshake(&mut receiver, &state).await {
        Ok(p) => p,
        Err(reason) => {
            send_event(
                &mut sender,
                &WsEvent::Error {
                    message: reason.to_string(),
                },
            )
            .await;
            let _ = sender.close().await;
            return;
        }
    };

    let registry = state.registry.clone();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsEvent>();
    let conn_id = registry.register(principal.account_id, tx.clone());

    send_event(
        &mut sender,
        &WsEvent::Connected {
            account_id: principal.account_id,
        },
    )
    .await;

    // Forward pushed events from the registry channel to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&event) {
                if sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // Handle incoming frames (keepalive, close)
    let tx_for_recv = tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    if let Ok(ClientFrame::Ping) = serde_json::from_str::<ClientFrame>(&text) {
                        let _ = tx_for_recv.send(WsEvent::Pong);
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    registry.unregister(principal.account_id, conn_id);
}
