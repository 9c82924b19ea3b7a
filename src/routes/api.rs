use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    analyze, create_character, create_document, create_location, create_timeline_event,
    delete_character, delete_document, delete_location, delete_timeline_event, diagnostics,
    extract_entities, format_dialogue, get_document, health_check, list_characters,
    list_locations, list_timeline_events, ready_check, synonyms, update_character,
    update_document, update_location, update_timeline_event, writing_prompt,
};
use crate::state::AppState;

/// Create API routes
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/diagnostics", get(diagnostics))
        .route("/documents", post(create_document))
        .route(
            "/documents/:id",
            get(get_document).put(update_document).delete(delete_document),
        )
        .route("/documents/:id/characters", get(list_characters))
        .route("/documents/:id/locations", get(list_locations))
        .route("/documents/:id/timeline", get(list_timeline_events))
        .route("/characters", post(create_character))
        .route(
            "/characters/:id",
            axum::routing::put(update_character).delete(delete_character),
        )
        .route("/locations", post(create_location))
        .route(
            "/locations/:id",
            axum::routing::put(update_location).delete(delete_location),
        )
        .route("/timeline", post(create_timeline_event))
        .route(
            "/timeline/:id",
            axum::routing::put(update_timeline_event).delete(delete_timeline_event),
        )
        .route("/ai/extract-entities", post(extract_entities))
        .route("/ai/synonyms", post(synonyms))
        .route("/ai/analyze", post(analyze))
        .route("/ai/writing-prompt", post(writing_prompt))
        .route("/ai/format-dialogue", post(format_dialogue))
        .with_state(state)
}
