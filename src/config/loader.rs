//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the rate table
//! and engine settings from YAML files.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::compliance::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::explanation::{
    ExplanationBudget, ExplanationProvider, LanguageModelExplainer, LanguageModelOptions,
    TemplateExplainer,
};

use super::types::{EngineSettings, ProviderKind, RatesConfig, WageDetermination};

/// API key values that select the template provider instead of a live model.
const MOCK_API_KEYS: [&str; 2] = ["mock", "mock-key"];

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/wcp/
/// ├── rates.yaml   # Wage determination and role rates (required)
/// └── engine.yaml  # Explanation provider and server settings (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use wcp_compliance::compliance::RateSource;
/// use wcp_compliance::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/wcp").unwrap();
/// let rate = loader.rate_table().lookup("Electrician").unwrap();
/// println!("Electrician base rate: ${}", rate.base_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    wage_determination: Option<WageDetermination>,
    rates: Arc<RateTable>,
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `rates.yaml` is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - The rates or settings are unusable (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rates_config = Self::load_yaml::<RatesConfig>(&path.join("rates.yaml"))?;

        let engine_path = path.join("engine.yaml");
        let settings = if engine_path.exists() {
            Self::load_yaml::<EngineSettings>(&engine_path)?
        } else {
            EngineSettings::default()
        };

        Self::from_parts(
            Some(rates_config.wage_determination),
            RateTable::new(rates_config.rates),
            settings,
        )
    }

    /// Builds a loader from already-parsed parts, validating them.
    pub fn from_parts(
        wage_determination: Option<WageDetermination>,
        rates: RateTable,
        settings: EngineSettings,
    ) -> EngineResult<Self> {
        if rates.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "rate table has no roles".to_string(),
            });
        }
        let negative = rates.iter().find(|(_, entry)| {
            entry.base_rate.is_sign_negative() || entry.fringe_rate.is_sign_negative()
        });
        if let Some((role, _)) = negative {
            return Err(EngineError::InvalidConfig {
                message: format!("role '{}' has a negative rate", role),
            });
        }
        if settings.explanation.max_steps == 0 {
            return Err(EngineError::InvalidConfig {
                message: "explanation.max_steps must be at least 1".to_string(),
            });
        }
        if settings.explanation.timeout_ms == 0 {
            return Err(EngineError::InvalidConfig {
                message: "explanation.timeout_ms must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            wage_determination,
            rates: Arc::new(rates),
            settings,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the wage determination metadata, if loaded from file.
    pub fn wage_determination(&self) -> Option<&WageDetermination> {
        self.wage_determination.as_ref()
    }

    /// Returns the shared rate table.
    pub fn rate_table(&self) -> Arc<RateTable> {
        Arc::clone(&self.rates)
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the explanation budget from the settings.
    pub fn budget(&self) -> ExplanationBudget {
        ExplanationBudget {
            max_steps: self.settings.explanation.max_steps,
            timeout: Duration::from_millis(self.settings.explanation.timeout_ms),
        }
    }

    /// Builds the configured explanation provider, reading the API key from
    /// the environment.
    pub fn explanation_provider(&self) -> EngineResult<Arc<dyn ExplanationProvider>> {
        let api_key = std::env::var(&self.settings.explanation.language_model.api_key_env).ok();
        self.explanation_provider_with_key(api_key)
    }

    /// Builds the configured explanation provider with an explicit API key.
    ///
    /// A missing key, or one of the mock keys (`mock`, `mock-key`), selects
    /// the template provider even when a language model is configured.
    pub fn explanation_provider_with_key(
        &self,
        api_key: Option<String>,
    ) -> EngineResult<Arc<dyn ExplanationProvider>> {
        let explanation = &self.settings.explanation;
        if explanation.provider == ProviderKind::Template {
            return Ok(Arc::new(TemplateExplainer));
        }

        let lm = &explanation.language_model;
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() && !MOCK_API_KEYS.contains(&key.as_str()) => key,
            _ => {
                warn!(
                    api_key_env = %lm.api_key_env,
                    "No live API key configured; using template explanations"
                );
                return Ok(Arc::new(TemplateExplainer));
            }
        };

        let explainer = LanguageModelExplainer::new(LanguageModelOptions {
            base_url: lm.base_url.clone(),
            model: lm.model.clone(),
            api_key,
            temperature: lm.temperature,
            max_tokens: lm.max_tokens,
            request_timeout: Duration::from_millis(explanation.timeout_ms),
        })?;
        Ok(Arc::new(explainer))
    }
}

impl Default for ConfigLoader {
    /// The built-in rate table with template explanations.
    fn default() -> Self {
        Self {
            wage_determination: None,
            rates: Arc::new(RateTable::default()),
            settings: EngineSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::{RateEntry, RateSource};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/wcp"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn language_model_settings() -> EngineSettings {
        let mut settings = EngineSettings::default();
        settings.explanation.provider = ProviderKind::LanguageModel;
        settings
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        let determination = loader.wage_determination().unwrap();
        assert_eq!(determination.id, "DC20250001");
    }

    #[test]
    fn test_loaded_rates_match_builtin_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let table = loader.rate_table();

        let electrician = table.lookup("Electrician").unwrap();
        assert_eq!(electrician.base_rate, dec("51.69"));
        assert_eq!(electrician.fringe_rate, dec("34.63"));

        let laborer = table.lookup("Laborer").unwrap();
        assert_eq!(laborer.base_rate, dec("26.45"));
        assert_eq!(laborer.fringe_rate, dec("12.50"));
    }

    #[test]
    fn test_loaded_settings() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.budget().max_steps, 3);
        assert_eq!(loader.budget().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("rates.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_rate_table_is_invalid() {
        let result = ConfigLoader::from_parts(
            None,
            RateTable::new(Vec::<(String, RateEntry)>::new()),
            EngineSettings::default(),
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_negative_rate_is_invalid() {
        let table = RateTable::new([(
            "Laborer",
            RateEntry {
                base_rate: dec("-1"),
                fringe_rate: dec("0"),
            },
        )]);
        let result = ConfigLoader::from_parts(None, table, EngineSettings::default());
        match result {
            Err(EngineError::InvalidConfig { message }) => assert!(message.contains("Laborer")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_steps_is_invalid() {
        let mut settings = EngineSettings::default();
        settings.explanation.max_steps = 0;
        let result = ConfigLoader::from_parts(None, RateTable::default(), settings);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_template_provider_by_default() {
        let provider = ConfigLoader::default()
            .explanation_provider_with_key(Some("sk-live".to_string()))
            .unwrap();
        assert_eq!(provider.name(), "template");
    }

    #[test]
    fn test_mock_key_selects_template() {
        let loader =
            ConfigLoader::from_parts(None, RateTable::default(), language_model_settings())
                .unwrap();
        for key in ["mock", "mock-key"] {
            let provider = loader
                .explanation_provider_with_key(Some(key.to_string()))
                .unwrap();
            assert_eq!(provider.name(), "template");
        }
    }

    #[test]
    fn test_missing_key_selects_template() {
        let loader =
            ConfigLoader::from_parts(None, RateTable::default(), language_model_settings())
                .unwrap();
        let provider = loader.explanation_provider_with_key(None).unwrap();
        assert_eq!(provider.name(), "template");
    }

    #[test]
    fn test_live_key_selects_language_model() {
        let loader =
            ConfigLoader::from_parts(None, RateTable::default(), language_model_settings())
                .unwrap();
        let provider = loader
            .explanation_provider_with_key(Some("sk-live".to_string()))
            .unwrap();
        assert_eq!(provider.name(), "language_model");
    }
}
