//! Configuration types for the compliance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::compliance::RateEntry;
use crate::explanation::{DEFAULT_MAX_STEPS, DEFAULT_TIMEOUT_MS};

/// Metadata about the wage determination the rates come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WageDetermination {
    /// The determination identifier (e.g., "DC20250001").
    pub id: String,
    /// A human-readable description of the determination.
    pub description: String,
    /// The date the rates take effect.
    pub effective_date: NaiveDate,
}

/// Rates configuration file structure (`rates.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// The determination these rates belong to.
    pub wage_determination: WageDetermination,
    /// Map of role to rates.
    pub rates: BTreeMap<String, RateEntry>,
}

/// Which explanation provider the engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// The deterministic template.
    #[default]
    Template,
    /// An OpenAI-compatible chat-completions endpoint.
    LanguageModel,
}

/// Settings for the language-model provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LanguageModelSettings {
    /// API root URL.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Token limit per completion request.
    pub max_tokens: u32,
}

impl Default for LanguageModelSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.2,
            max_tokens: 400,
        }
    }
}

/// Explanation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplanationSettings {
    /// The provider to use.
    pub provider: ProviderKind,
    /// Maximum completion requests per explanation.
    pub max_steps: u32,
    /// Time allowed for one explanation, in milliseconds.
    pub timeout_ms: u64,
    /// Language-model connection settings.
    pub language_model: LanguageModelSettings,
}

impl Default for ExplanationSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Template,
            max_steps: DEFAULT_MAX_STEPS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            language_model: LanguageModelSettings::default(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to bind.
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Engine configuration file structure (`engine.yaml`).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Explanation provider settings.
    pub explanation: ExplanationSettings,
    /// HTTP server settings.
    pub server: ServerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_rates_config_deserializes() {
        let yaml = r#"
wage_determination:
  id: "DC20250001"
  description: "Building construction"
  effective_date: 2025-01-03
rates:
  Electrician:
    base_rate: "51.69"
    fringe_rate: "34.63"
"#;
        let config: RatesConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.wage_determination.id, "DC20250001");
        assert_eq!(
            config.rates["Electrician"].base_rate,
            Decimal::from_str("51.69").unwrap()
        );
    }

    #[test]
    fn test_partial_engine_settings_fill_defaults() {
        let yaml = r#"
explanation:
  provider: language_model
  max_steps: 5
"#;
        let settings: EngineSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.explanation.provider, ProviderKind::LanguageModel);
        assert_eq!(settings.explanation.max_steps, 5);
        assert_eq!(settings.explanation.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(settings.explanation.language_model.api_key_env, "OPENAI_API_KEY");
        assert_eq!(settings.server.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let yaml = "explanation:\n  provider: oracle\n";
        let result: Result<EngineSettings, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }
}
