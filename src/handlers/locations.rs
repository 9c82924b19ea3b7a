use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::models::{CreateLocationRequest, ErrorResponse, Location, UpdateLocationRequest};
use crate::state::AppState;

/// List a document's locations
pub async fn list_locations(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<Vec<Location>>, (StatusCode, Json<ErrorResponse>)> {
    if !state.storage.document_exists(document_id).await {
        return Err(ErrorResponse::not_found("Document not found"));
    }
    Ok(Json(state.storage.get_locations_by_document(document_id).await))
}

/// Create a location
pub async fn create_location(
    State(state): State<AppState>,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<Location>), (StatusCode, Json<ErrorResponse>)> {
    if payload.name.is_empty() {
        return Err(ErrorResponse::bad_request("Invalid location data"));
    }
    if !state.storage.document_exists(payload.document_id).await {
        return Err(ErrorResponse::not_found("Document not found"));
    }
    let location = state.storage.create_location(payload).await;
    Ok((StatusCode::CREATED, Json(location)))
}

/// Update a location
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<Json<Location>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.update_location(id, payload).await {
        Some(location) => Ok(Json(location)),
        None => Err(ErrorResponse::not_found("Location not found")),
    }
}

/// Delete a location
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    if state.storage.delete_location(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ErrorResponse::not_found("Location not found"))
    }
}
