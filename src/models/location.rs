use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A story location tracked for one document.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Uuid,
    pub document_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub key_features: Option<String>,
    pub first_mentioned: Option<String>,
}

/// Request body for creating a location
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    pub document_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub key_features: Option<String>,
    pub first_mentioned: Option<String>,
}

/// Partial update for a location; omitted fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub key_features: Option<String>,
    pub first_mentioned: Option<String>,
}
