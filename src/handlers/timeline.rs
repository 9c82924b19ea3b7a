use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::models::{
    CreateTimelineEventRequest, ErrorResponse, TimelineEvent, UpdateTimelineEventRequest,
};
use crate::state::AppState;

/// List a document's timeline events, ordered by their `order` field
pub async fn list_timeline_events(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<Vec<TimelineEvent>>, (StatusCode, Json<ErrorResponse>)> {
    if !state.storage.document_exists(document_id).await {
        return Err(ErrorResponse::not_found("Document not found"));
    }
    Ok(Json(
        state
            .storage
            .get_timeline_events_by_document(document_id)
            .await,
    ))
}

/// Create a timeline event
pub async fn create_timeline_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateTimelineEventRequest>,
) -> Result<(StatusCode, Json<TimelineEvent>), (StatusCode, Json<ErrorResponse>)> {
    if payload.title.is_empty() {
        return Err(ErrorResponse::bad_request("Invalid timeline event data"));
    }
    if !state.storage.document_exists(payload.document_id).await {
        return Err(ErrorResponse::not_found("Document not found"));
    }
    let event = state.storage.create_timeline_event(payload).await;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Update a timeline event
pub async fn update_timeline_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTimelineEventRequest>,
) -> Result<Json<TimelineEvent>, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.update_timeline_event(id, payload).await {
        Some(event) => Ok(Json(event)),
        None => Err(ErrorResponse::not_found("Timeline event not found")),
    }
}

/// Delete a timeline event
pub async fn delete_timeline_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    if state.storage.delete_timeline_event(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ErrorResponse::not_found("Timeline event not found"))
    }
}
