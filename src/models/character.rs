use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A character tracked for one document.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: Uuid,
    pub document_id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub age: Option<String>,
    pub appearance: Option<String>,
    pub traits: Option<String>,
    /// Free-form relationship list maintained by the client.
    #[schema(value_type = Object)]
    pub relationships: serde_json::Value,
    pub last_mentioned: Option<String>,
}

/// Request body for creating a character
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterRequest {
    pub document_id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub age: Option<String>,
    pub appearance: Option<String>,
    pub traits: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub relationships: Option<serde_json::Value>,
    pub last_mentioned: Option<String>,
}

/// Partial update for a character; omitted fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacterRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub age: Option<String>,
    pub appearance: Option<String>,
    pub traits: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub relationships: Option<serde_json::Value>,
    pub last_mentioned: Option<String>,
}
