use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::models::{
    Character, CreateCharacterRequest, ErrorResponse, UpdateCharacterRequest,
};
use crate::state::AppState;

/// List a document's characters
pub async fn list_characters(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<Vec<Character>>, (StatusCode, Json<ErrorResponse>)> {
    if !state.storage.document_exists(document_id).await {
        return Err(ErrorResponse::not_found("Document not found"));
    }
    Ok(Json(state.storage.get_characters_by_document(document_id).await))
}

/// Create a character
pub async fn create_character(
    State(state): State<AppState>,
    Json(payload): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<Character>), (StatusCode, Json<ErrorResponse>)> {
    if payload.name.is_empty() {
        return Err(ErrorResponse::bad_request("Invalid character data"));
    }
    if !state.storage.document_exists(payload.document_id).await {
        return Err(ErrorResponse::not_found("Document not found"));
    }
    let character = state.storage.create_character(payload).await;
    Ok((StatusCode::CREATED, Json(character)))
}

/// Update a character
pub async fn update_character(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCharacterRequest>,
) -> Result<Json<Character>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.update_character(id, payload).await {
        Some(character) => Ok(Json(character)),
        None => Err(ErrorResponse::not_found("Character not found")),
    }
}

/// Delete a character
pub async fn delete_character(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    if state.storage.delete_character(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ErrorResponse::not_found("Character not found"))
    }
}
