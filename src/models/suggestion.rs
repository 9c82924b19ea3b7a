use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored AI suggestion for a document.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub id: Uuid,
    pub document_id: Uuid,
    /// One of `synonym`, `grammar`, `style`, `plot`.
    #[serde(rename = "type")]
    pub kind: String,
    pub original_text: String,
    pub suggestion: String,
    pub position: u32,
    pub applied: bool,
}

/// Request body for storing an AI suggestion
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAiSuggestionRequest {
    pub document_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub original_text: String,
    pub suggestion: String,
    pub position: u32,
    #[serde(default)]
    pub applied: bool,
}
