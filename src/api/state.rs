//! Application state for the settlement API.

use std::sync::Arc;

use crate::config::{ConfigLoader, EosConfig};

/// Shared application state.
///
/// Holds the gratuity rule table, loaded once and shared read-only across
/// all request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<EosConfig>,
}

impl AppState {
    /// Creates a new application state from a loaded configuration.
    pub fn new(loader: ConfigLoader) -> Self {
        Self::from_config(loader.into_config())
    }

    /// Creates a new application state from a rule table.
    pub fn from_config(config: EosConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the rule table.
    pub fn config(&self) -> &EosConfig {
        &self.config
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(EosConfig::default())
    }
}
