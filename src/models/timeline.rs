use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A plot event on a document's timeline. Listings are ordered by `order`.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: Uuid,
    pub document_id: Uuid,
    pub title: String,
    pub chapter: Option<String>,
    pub description: Option<String>,
    pub order: i32,
}

/// Request body for creating a timeline event
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimelineEventRequest {
    pub document_id: Uuid,
    pub title: String,
    pub chapter: Option<String>,
    pub description: Option<String>,
    pub order: i32,
}

/// Partial update for a timeline event; omitted fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimelineEventRequest {
    pub title: Option<String>,
    pub chapter: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
}
