//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::SplitSink, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{DisplayName, Member},
    ui::state::AppState,
};
use murmur_shared::wire::{Envelope, MESSAGE_EVENT, OutgoingMessage};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub name: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let name = match query.name.map(DisplayName::try_from) {
        Some(Ok(name)) => name,
        Some(Err(e)) => {
            tracing::warn!("Rejecting connection: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
        None => {
            tracing::warn!("Rejecting connection without a name");
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    tracing::info!("Upgrading connection for '{}'", name);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, name)))
}

/// Spawns a task that drains the member's channel into the WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Decode one inbound text frame into the text to relay.
///
/// Returns `None` for frames that are not `"message"` events or fail to parse.
fn decode_chat_frame(text: &str) -> Option<String> {
    match serde_json::from_str::<Envelope<OutgoingMessage>>(text) {
        Ok(envelope) if envelope.is_event(MESSAGE_EVENT) => Some(envelope.data.data),
        Ok(envelope) => {
            tracing::warn!("Ignoring frame with unknown event '{}'", envelope.event);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to parse frame as JSON: {}", e);
            None
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, name: DisplayName) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let member = state.connect_member_usecase.execute(name, tx).await;
    tracing::info!("Member '{}' ({}) joined", member.name, member.id);

    let mut send_task = pusher_loop(rx, sender);

    if let Err(e) = state.connect_member_usecase.announce_entered(&member).await {
        tracing::warn!("Failed to announce '{}': {}", member.name, e);
    }

    let state_for_recv = state.clone();
    let member_for_recv: Member = member.clone();

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", member_for_recv.name, text);
                    let Some(chat) = decode_chat_frame(&text) else {
                        continue;
                    };
                    match state_for_recv
                        .relay_message_usecase
                        .execute(&member_for_recv, chat)
                        .await
                    {
                        Ok(targets) => tracing::info!(
                            "Relayed message from '{}' to {} member(s)",
                            member_for_recv.name,
                            targets.len()
                        ),
                        Err(e) => tracing::warn!("Failed to relay message: {}", e),
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Member '{}' requested close", member_for_recv.name);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state.disconnect_member_usecase.execute(&member.id).await {
        Ok(Some(left)) => tracing::info!("Member '{}' ({}) left", left.name, left.id),
        Ok(None) => tracing::debug!("Member '{}' was already unregistered", member.id),
        Err(e) => tracing::warn!("Failed to announce departure of '{}': {}", member.name, e),
    }
}
