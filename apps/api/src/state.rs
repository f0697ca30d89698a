use std::sync::Arc;

use crate::config::Config;
use crate::sections::SectionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only after startup; shared by every request and blocking export task.
    pub registry: Arc<SectionRegistry>,
}

impl AppState {
    pub fn new(config: Config, registry: SectionRegistry) -> Self {
        Self {
            config,
            registry: Arc::new(registry),
        }
    }
}
