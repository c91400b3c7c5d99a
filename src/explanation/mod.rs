//! Explanation authoring for compliance decisions.
//!
//! Status and findings are fixed before any explanation is written. An
//! [`ExplanationProvider`] only receives them as constraints and returns text
//! plus a token count; it has no way to change the outcome.
//!
//! Two providers are available:
//! - [`TemplateExplainer`]: deterministic, always succeeds
//! - [`LanguageModelExplainer`]: OpenAI-compatible chat completions

mod language_model;
mod template;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::{DecisionStatus, ExplanationSource, ExtractedRecord, Finding};

pub use language_model::{LanguageModelExplainer, LanguageModelOptions};
pub use template::TemplateExplainer;

/// Default number of completion requests a provider may make per explanation.
pub const DEFAULT_MAX_STEPS: u32 = 3;

/// Default time allowed for one explanation, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// The fixed outcome an explanation must describe.
#[derive(Debug, Clone, Copy)]
pub struct ExplanationRequest<'a> {
    /// The validated record.
    pub record: &'a ExtractedRecord,
    /// Findings in rule order.
    pub findings: &'a [Finding],
    /// The already-decided status.
    pub status: DecisionStatus,
    /// Maximum completion requests the provider may issue.
    pub max_steps: u32,
}

/// Text written by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredExplanation {
    /// The explanation text.
    pub text: String,
    /// Tokens consumed while writing it.
    pub token_usage: u64,
    /// Which kind of provider wrote it.
    pub source: ExplanationSource,
}

/// Limits applied to one explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplanationBudget {
    /// Maximum completion requests.
    pub max_steps: u32,
    /// Wall-clock limit for the whole explanation.
    pub timeout: Duration,
}

impl ExplanationBudget {
    /// Returns a copy with `max_steps` lowered to `requested`, never below one.
    pub fn limited_to(self, requested: Option<u32>) -> Self {
        match requested {
            Some(steps) => Self {
                max_steps: steps.clamp(1, self.max_steps.max(1)),
                ..self
            },
            None => self,
        }
    }
}

impl Default for ExplanationBudget {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// A capability that writes the explanation for a fixed decision.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    /// Short provider name used in logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Writes an explanation for the given outcome.
    async fn author(
        &self,
        request: &ExplanationRequest<'_>,
    ) -> Result<AuthoredExplanation, ProviderError>;
}
