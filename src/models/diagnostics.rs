use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for diagnostics information
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsResponse {
    /// Live collaboration sessions (one per open document).
    pub n_sessions: u32,
    /// Participants across all sessions.
    pub n_participants: u32,
    /// Documents held in storage.
    pub n_documents: u32,
    pub cpu_usage: f32,
    pub memory_alloc: u64,
    pub memory_total: u64,
    pub memory_free: u64,
}
