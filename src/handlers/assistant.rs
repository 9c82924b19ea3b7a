use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

use crate::models::{
    AnalyzeRequest, AnalyzeResponse, EntityExtractionResult, ErrorResponse,
    ExtractEntitiesRequest, FormatDialogueRequest, FormatDialogueResponse, SynonymsRequest,
    SynonymsResponse, WritingPromptRequest, WritingPromptResponse,
};
use crate::services::writing_assistant::AssistantError;
use crate::state::AppState;

fn map_assistant_error(
    e: AssistantError,
    message: &str,
) -> (StatusCode, Json<ErrorResponse>) {
    match e {
        AssistantError::NotConfigured => {
            ErrorResponse::new(StatusCode::SERVICE_UNAVAILABLE, "Writing assistant is not configured")
        }
        AssistantError::Http(e) => {
            error!("{}: {}", message, e);
            ErrorResponse::new(StatusCode::BAD_GATEWAY, message)
        }
        AssistantError::Malformed(e) => {
            error!("{}: {}", message, e);
            ErrorResponse::new(StatusCode::BAD_GATEWAY, message)
        }
    }
}

/// Extract characters, locations and events from narrative text
pub async fn extract_entities(
    State(state): State<AppState>,
    Json(payload): Json<ExtractEntitiesRequest>,
) -> Result<Json<EntityExtractionResult>, (StatusCode, Json<ErrorResponse>)> {
    if payload.text.is_empty() {
        return Err(ErrorResponse::bad_request("Text is required"));
    }
    state
        .assistant
        .extract_entities(&payload.text)
        .await
        .map(Json)
        .map_err(|e| map_assistant_error(e, "Failed to extract entities"))
}

/// Suggest contextual synonyms for a word
pub async fn synonyms(
    State(state): State<AppState>,
    Json(payload): Json<SynonymsRequest>,
) -> Result<Json<SynonymsResponse>, (StatusCode, Json<ErrorResponse>)> {
    if payload.word.is_empty() || payload.context.is_empty() {
        return Err(ErrorResponse::bad_request("Word and context are required"));
    }
    state
        .assistant
        .generate_synonyms(&payload.word, &payload.context)
        .await
        .map(|synonyms| Json(SynonymsResponse { synonyms }))
        .map_err(|e| map_assistant_error(e, "Failed to generate synonyms"))
}

/// Analyze text for grammar, style and plot improvements
pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<ErrorResponse>)> {
    if payload.text.is_empty() {
        return Err(ErrorResponse::bad_request("Text is required"));
    }
    state
        .assistant
        .analyze_writing(&payload.text)
        .await
        .map(|suggestions| Json(AnalyzeResponse { suggestions }))
        .map_err(|e| map_assistant_error(e, "Failed to analyze text"))
}

/// Generate a prompt to continue the story
pub async fn writing_prompt(
    State(state): State<AppState>,
    Json(payload): Json<WritingPromptRequest>,
) -> Result<Json<WritingPromptResponse>, (StatusCode, Json<ErrorResponse>)> {
    if payload.text.is_empty() {
        return Err(ErrorResponse::bad_request("Text is required"));
    }
    state
        .assistant
        .generate_writing_prompt(&payload.text, payload.context.as_deref())
        .await
        .map(|prompt| Json(WritingPromptResponse { prompt }))
        .map_err(|e| map_assistant_error(e, "Failed to generate writing prompt"))
}

/// Reformat dialogue punctuation and structure
pub async fn format_dialogue(
    State(state): State<AppState>,
    Json(payload): Json<FormatDialogueRequest>,
) -> Result<Json<FormatDialogueResponse>, (StatusCode, Json<ErrorResponse>)> {
    if payload.text.is_empty() {
        return Err(ErrorResponse::bad_request("Text is required"));
    }
    state
        .assistant
        .format_dialogue(&payload.text)
        .await
        .map(|formatted_text| Json(FormatDialogueResponse { formatted_text }))
        .map_err(|e| map_assistant_error(e, "Failed to format dialogue"))
}
