// --- File: crates/services/meetly_backend/src/app_state.rs ---
use meetly_config::AppConfig;
use std::sync::Arc;

use crate::service_factory::MeetlyServiceFactory;

/// Application state shared across the backend routes.
#[derive(Clone)]
pub struct AppState {
    /// The configuration loaded at startup.
    pub config: Arc<AppConfig>,
    /// Collaborators and the booking workflow built from `config`.
    pub service_factory: Arc<MeetlyServiceFactory>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, service_factory: MeetlyServiceFactory) -> Self {
        Self {
            config,
            service_factory: Arc::new(service_factory),
        }
    }
}
