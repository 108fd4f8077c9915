//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::models::SourceTables;

/// Shared application state.
///
/// Holds the source tables loaded at startup and the configuration. Both are
/// read-only; every request runs its own pipeline over them.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// The loaded source tables.
    sources: Arc<SourceTables>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, sources: SourceTables) -> Self {
        Self {
            config: Arc::new(config),
            sources: Arc::new(sources),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the source tables.
    pub fn sources(&self) -> &SourceTables {
        &self.sources
    }
}
