//! Application state for the WCP compliance API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::engine::ComplianceEngine;
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the compliance engine and the list of roles it knows, both shared
/// read-only across handlers.
#[derive(Clone)]
pub struct AppState {
    engine: ComplianceEngine,
    roles: Arc<[String]>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: ComplianceEngine, roles: Vec<String>) -> Self {
        Self {
            engine,
            roles: roles.into(),
        }
    }

    /// Builds the state from loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> EngineResult<Self> {
        let engine = ComplianceEngine::from_config(config)?;
        let roles = config.rate_table().roles().map(str::to_string).collect();
        Ok(Self::new(engine, roles))
    }

    /// Returns the compliance engine.
    pub fn engine(&self) -> &ComplianceEngine {
        &self.engine
    }

    /// Returns the roles in the rate table, sorted.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}
