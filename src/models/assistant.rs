use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for entity extraction
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ExtractEntitiesRequest {
    pub text: String,
}

/// A character mentioned in analyzed text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedCharacter {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub traits: Option<String>,
    #[serde(default)]
    pub context: String,
}

/// A location mentioned in analyzed text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedLocation {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub context: String,
}

/// A plot event mentioned in analyzed text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEvent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub context: String,
}

/// Entities recognized in a chunk of narrative text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityExtractionResult {
    #[serde(default)]
    pub characters: Vec<ExtractedCharacter>,
    #[serde(default)]
    pub locations: Vec<ExtractedLocation>,
    #[serde(default)]
    pub events: Vec<ExtractedEvent>,
}

/// Request body for contextual synonym lookup
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SynonymsRequest {
    pub word: String,
    pub context: String,
}

/// Response for contextual synonym lookup
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SynonymsResponse {
    pub synonyms: Vec<String>,
}

/// Request body for writing analysis
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// One improvement suggested by the writing analysis.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WritingSuggestion {
    /// One of `synonym`, `grammar`, `style`, `plot`.
    #[serde(rename = "type")]
    pub kind: String,
    pub original_text: String,
    pub suggestion: String,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Response for writing analysis
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct AnalyzeResponse {
    pub suggestions: Vec<WritingSuggestion>,
}

/// Request body for generating a writing prompt
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct WritingPromptRequest {
    pub text: String,
    pub context: Option<String>,
}

/// Response carrying a generated writing prompt
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct WritingPromptResponse {
    pub prompt: String,
}

/// Request body for dialogue formatting
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct FormatDialogueRequest {
    pub text: String,
}

/// Response carrying reformatted dialogue
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormatDialogueResponse {
    pub formatted_text: String,
}
