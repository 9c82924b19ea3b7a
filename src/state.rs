use std::sync::Arc;

use crate::config::Config;
use crate::services::writing_assistant::WritingAssistant;
use crate::storage::MemStorage;
use crate::ws::registry::SessionRegistry;

/// Shared application state. The registry is owned here, not module-global,
/// so tests can stand up isolated instances.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<MemStorage>,
    pub registry: Arc<SessionRegistry>,
    pub assistant: Arc<WritingAssistant>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            storage: Arc::new(MemStorage::new()),
            registry: Arc::new(SessionRegistry::new()),
            assistant: Arc::new(WritingAssistant::new(config)),
        }
    }
}
