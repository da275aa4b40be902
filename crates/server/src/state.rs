//! Application state shared across handlers.

use shroud_core::AppConfig;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state, warning about configurations that
    /// make the gated endpoint unusable.
    pub fn new(config: AppConfig) -> Self {
        if config.server.api_key.is_none() {
            tracing::warn!("no api key configured; every /code request will be rejected");
        }
        Self {
            config: Arc::new(config),
        }
    }
}
