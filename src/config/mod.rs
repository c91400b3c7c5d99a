//! Configuration loading and management for the WCP compliance engine.
//!
//! This module loads the wage-determination rate table and the engine
//! settings (explanation provider, step budget, timeout, bind address) from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use wcp_compliance::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/wcp").unwrap();
//! println!("Roles loaded: {}", config.rate_table().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineSettings, ExplanationSettings, LanguageModelSettings, ProviderKind, RatesConfig,
    ServerSettings, WageDetermination,
};
