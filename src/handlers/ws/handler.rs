//! Axum WebSocket handler
//!
//! Owns one streaming session per connected user: pulls audio frames,
//! drives the wake pipeline, and emits one decision per frame in receive
//! order. The connection lifecycle is Connected → Streaming → Closed;
//! anything short of a transport-level failure keeps the loop alive.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::state::AppState;

use super::{messages::OutgoingMessage, processor::process_chunk};

/// Reply channel sized for audio workloads; the pipeline produces at most
/// one reply per inbound chunk, so this rarely fills.
const CHANNEL_BUFFER_SIZE: usize = 64;

/// WebSocket wake detection handler
/// Upgrades the HTTP connection for per-user streaming wake detection
pub async fn ws_wake_handler(
    ws: WebSocketUpgrade,
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    info!("WebSocket wake connection upgrade requested for user {user_id}");
    ws.on_upgrade(move |socket| handle_wake_socket(socket, user_id, state))
}

/// Handle one streaming wake session.
async fn handle_wake_socket(socket: WebSocket, user_id: String, app_state: Arc<AppState>) {
    let session = app_state.sessions.get_or_create(&user_id);
    info!(
        "User {} connected, keywords: {:?}",
        user_id,
        session.keywords()
    );

    let (mut sender, mut receiver) = socket.split();

    let (message_tx, mut message_rx) = mpsc::channel::<OutgoingMessage>(CHANNEL_BUFFER_SIZE);

    // Writer task: serializes replies in channel order, which preserves the
    // one-reply-per-chunk FIFO contract
    let sender_task = tokio::spawn(async move {
        while let Some(message) = message_rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize outgoing message: {}", e);
                    continue;
                }
            };
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                error!("Failed to send WebSocket message: {}", e);
                break;
            }
        }
    });

    while let Some(msg_result) = receiver.next().await {
        match msg_result {
            Ok(msg) => {
                if !process_message(msg, &user_id, &session, &app_state, &message_tx).await {
                    break;
                }
            }
            Err(e) => {
                warn!("WebSocket error for user {}: {}", user_id, e);
                break;
            }
        }
    }

    sender_task.abort();
    info!("User {} disconnected", user_id);
}

/// Process one inbound WebSocket message.
///
/// Returns false when the connection should close. Chunk-level problems are
/// fail-open: the reply degrades, the loop continues.
async fn process_message(
    msg: Message,
    user_id: &str,
    session: &crate::core::session::UserSession,
    app_state: &Arc<AppState>,
    message_tx: &mpsc::Sender<OutgoingMessage>,
) -> bool {
    match msg {
        Message::Binary(data) => {
            // Exactly one reply per chunk; malformed chunks degrade to an
            // empty negative decision instead of going unanswered
            let decision = process_chunk(&data, session, &app_state.gateway).await;
            if decision.wake_detected {
                info!("User {} woke: {}", user_id, decision.text);
            }
            if message_tx
                .send(OutgoingMessage::Decision(decision))
                .await
                .is_err()
            {
                return false;
            }
            true
        }
        Message::Text(text) => {
            debug!("Unexpected text frame from user {}: {} bytes", user_id, text.len());
            let _ = message_tx
                .send(OutgoingMessage::Error {
                    error: "binary audio expected".to_string(),
                })
                .await;
            true
        }
        Message::Ping(_) | Message::Pong(_) => {
            // Handled automatically by axum
            true
        }
        Message::Close(_) => {
            info!("WebSocket connection closed by user {}", user_id);
            false
        }
    }
}
