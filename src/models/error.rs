use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for an error
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: u16,
    pub status: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(code: StatusCode, error: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            code,
            Json(Self {
                code: code.as_u16(),
                status: code
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
                error: error.into(),
            }),
        )
    }

    pub fn not_found(error: impl Into<String>) -> (StatusCode, Json<Self>) {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    pub fn bad_request(error: impl Into<String>) -> (StatusCode, Json<Self>) {
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}
