//! Application state.

use std::sync::Arc;

use vidgrab_media::ToolLocator;

use crate::config::ApiConfig;

/// Shared application state.
///
/// The service keeps no per-request or cross-request mutable state and
/// caches nothing; everything here is resolved at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub locator: Arc<ToolLocator>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            locator: Arc::new(ToolLocator::default()),
        }
    }

    /// State with an explicit tool locator. Tests use this to stand in
    /// a stub executable for the real extraction tool.
    pub fn with_locator(config: ApiConfig, locator: ToolLocator) -> Self {
        Self {
            config,
            locator: Arc::new(locator),
        }
    }
}
