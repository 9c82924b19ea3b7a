use utoipa::OpenApi;

use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Fetch a document
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    responses(
        (status = 200, description = "The requested document", body = Document),
        (status = 404, description = "Document not found", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn get_document_doc() {}

/// Create a document
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document created successfully", body = Document)
    )
)]
#[allow(dead_code)]
pub async fn create_document_doc() {}

/// Extract story entities from text
#[utoipa::path(
    post,
    path = "/api/ai/extract-entities",
    request_body = ExtractEntitiesRequest,
    responses(
        (status = 200, description = "Entities recognized in the text", body = EntityExtractionResult),
        (status = 503, description = "Writing assistant not configured", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn extract_entities_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        get_document_doc,
        create_document_doc,
        extract_entities_doc,
    ),
    components(
        schemas(
            HealthResponse,
            DiagnosticsResponse,
            ErrorResponse,
            Document,
            CreateDocumentRequest,
            UpdateDocumentRequest,
            Character,
            CreateCharacterRequest,
            UpdateCharacterRequest,
            Location,
            CreateLocationRequest,
            UpdateLocationRequest,
            TimelineEvent,
            CreateTimelineEventRequest,
            UpdateTimelineEventRequest,
            AiSuggestion,
            CreateAiSuggestionRequest,
            ExtractEntitiesRequest,
            EntityExtractionResult,
            ExtractedCharacter,
            ExtractedLocation,
            ExtractedEvent,
            SynonymsRequest,
            SynonymsResponse,
            AnalyzeRequest,
            AnalyzeResponse,
            WritingSuggestion,
            WritingPromptRequest,
            WritingPromptResponse,
            FormatDialogueRequest,
            FormatDialogueResponse,
            Collaborator,
        )
    ),
    tags(
        (name = "api", description = "API endpoints")
    )
)]
pub struct ApiDoc;
