use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::models::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::ws::registry::SessionRegistry;

/// WebSocket upgrade handler for the collaboration endpoint.
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    info!("New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, state.registry.clone()))
}

/// Drive one client connection: deliver registry events back onto the wire
/// and translate inbound frames into registry calls.
///
/// A connection is bound to at most one (document, user) pair at a time.
/// Joining while already joined leaves the previous document first. Whatever
/// the connection last joined is left again when the socket closes, clean or
/// abrupt, so no participant outlives its transport.
async fn handle_socket(socket: WebSocket, registry: Arc<SessionRegistry>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    // Forward registry events to the client. Ends when the outbox is dropped
    // or the peer stops accepting frames.
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let payload = match serde_json::to_string(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Failed to serialize outbound event: {}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }
    });

    // (document_id, user_id) this connection is currently joined as.
    let mut joined: Option<(String, String)> = None;

    while let Some(Ok(msg)) = stream.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Ping/pong are answered by axum itself; binary frames are not
            // part of the protocol.
            _ => continue,
        };

        let client_msg: ClientMessage = match serde_json::from_str(&text) {
            Ok(client_msg) => client_msg,
            Err(e) => {
                warn!("Malformed collaboration message: {}", e);
                let _ = tx.send(ServerMessage::Error {
                    message: format!("Invalid message: {}", e),
                });
                continue;
            }
        };

        match client_msg {
            ClientMessage::JoinDocument {
                document_id,
                user_id,
                user_name,
            } => {
                if document_id.is_empty() || user_id.is_empty() {
                    let _ = tx.send(ServerMessage::Error {
                        message: "documentId and userId must be non-empty".to_string(),
                    });
                    continue;
                }
                if let Some((prev_doc, prev_user)) = joined.take() {
                    registry.leave(&prev_doc, &prev_user, &tx);
                }
                registry.join(&document_id, &user_id, &user_name, tx.clone());
                joined = Some((document_id, user_id));
            }
            ClientMessage::LeaveDocument { document_id } => {
                match joined.take() {
                    Some((doc, user)) => {
                        if doc != document_id {
                            debug!(
                                "leave_document for {} while joined to {}; leaving {}",
                                document_id, doc, doc
                            );
                        }
                        registry.leave(&doc, &user, &tx);
                    }
                    None => {
                        let _ = tx.send(ServerMessage::Error {
                            message: "Not joined to a document".to_string(),
                        });
                    }
                }
            }
            ClientMessage::CursorUpdate { position, .. } => match &joined {
                Some((doc, user)) => registry.update_cursor(doc, user, position),
                None => {
                    let _ = tx.send(ServerMessage::Error {
                        message: "Not joined to a document".to_string(),
                    });
                }
            },
            ClientMessage::ContentChange {
                content,
                word_count,
                ..
            } => match &joined {
                Some((doc, user)) => {
                    registry.broadcast_content_change(doc, user, &content, word_count)
                }
                None => {
                    let _ = tx.send(ServerMessage::Error {
                        message: "Not joined to a document".to_string(),
                    });
                }
            },
        }
    }

    if let Some((doc, user)) = joined {
        registry.leave(&doc, &user, &tx);
    }
    send_task.abort();
    info!("WebSocket connection terminated");
}
