pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod ws;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::docs::ApiDoc;
use crate::state::AppState;

/// Assemble the full application router: REST API under `/api`, the
/// collaboration socket at `/ws`, and Swagger UI.
pub fn app(config: &Config, state: AppState) -> Router {
    let mut router = Router::new()
        .nest("/api", routes::create_api_routes(state.clone()))
        .route("/ws", get(ws::handler::websocket_handler).with_state(state))
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    if config.is_development() {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
