//! Deterministic template explanations.

use async_trait::async_trait;

use crate::compliance::compose_explanation;
use crate::error::ProviderError;
use crate::models::ExplanationSource;

use super::{AuthoredExplanation, ExplanationProvider, ExplanationRequest};

/// Writes explanations from a fixed template. Never fails and uses no tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExplainer;

impl TemplateExplainer {
    /// Writes the template explanation synchronously.
    pub fn explain(request: &ExplanationRequest<'_>) -> AuthoredExplanation {
        AuthoredExplanation {
            text: compose_explanation(request.record, request.findings, request.status),
            token_usage: 0,
            source: ExplanationSource::Template,
        }
    }
}

#[async_trait]
impl ExplanationProvider for TemplateExplainer {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn author(
        &self,
        request: &ExplanationRequest<'_>,
    ) -> Result<AuthoredExplanation, ProviderError> {
        Ok(Self::explain(request))
    }
}
