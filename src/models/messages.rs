use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One connected user within a collaboration session, as seen by its peers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub user_id: String,
    pub user_name: String,
    pub cursor_position: Option<u64>,
}

/// Messages a client may send over the collaboration socket.
///
/// Unknown `type` tags and frames missing required fields fail to
/// deserialize; the gateway answers those with an `error` frame and keeps
/// the connection open.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "join_document", rename_all = "camelCase")]
    JoinDocument {
        document_id: String,
        user_id: String,
        user_name: String,
    },
    #[serde(rename = "leave_document", rename_all = "camelCase")]
    LeaveDocument { document_id: String },
    #[serde(rename = "cursor_update", rename_all = "camelCase")]
    CursorUpdate { document_id: String, position: u64 },
    #[serde(rename = "content_change", rename_all = "camelCase")]
    ContentChange {
        document_id: String,
        content: String,
        word_count: u32,
    },
}

/// Messages the relay sends back to connected clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "current_collaborators", rename_all = "camelCase")]
    CurrentCollaborators { collaborators: Vec<Collaborator> },
    #[serde(rename = "user_joined", rename_all = "camelCase")]
    UserJoined { user_id: String, user_name: String },
    #[serde(rename = "user_left", rename_all = "camelCase")]
    UserLeft { user_id: String, user_name: String },
    #[serde(rename = "cursor_moved", rename_all = "camelCase")]
    CursorMoved {
        user_id: String,
        user_name: String,
        position: u64,
    },
    #[serde(rename = "content_updated", rename_all = "camelCase")]
    ContentUpdated {
        user_id: String,
        user_name: String,
        content: String,
        word_count: u32,
    },
    #[serde(rename = "error", rename_all = "camelCase")]
    Error { message: String },
}
