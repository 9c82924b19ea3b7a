use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::models::{
    CreateDocumentRequest, Document, ErrorResponse, UpdateDocumentRequest,
};
use crate::state::AppState;

/// Fetch a document
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.get_document(id).await {
        Some(document) => Ok(Json(document)),
        None => Err(ErrorResponse::not_found("Document not found")),
    }
}

/// Create a document
pub async fn create_document(
    State(state): State<AppState>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), (StatusCode, Json<ErrorResponse>)> {
    if payload.title.is_empty() {
        return Err(ErrorResponse::bad_request("Invalid document data"));
    }
    let document = state.storage.create_document(payload).await;
    Ok((StatusCode::CREATED, Json(document)))
}

/// Update a document
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.update_document(id, payload).await {
        Some(document) => Ok(Json(document)),
        None => Err(ErrorResponse::not_found("Document not found")),
    }
}

/// Delete a document
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    if state.storage.delete_document(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ErrorResponse::not_found("Document not found"))
    }
}
