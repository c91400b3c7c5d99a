//! The compliance decision engine.
//!
//! [`ComplianceEngine`] joins extraction, validation, decision synthesis,
//! explanation authoring, the audit trace and health metrics into one
//! [`Decision`]. Everything except explanation authoring is synchronous and
//! pure; the engine itself holds only shared, immutable state and can be
//! cloned freely across tasks.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::compliance::{RateSource, Validator, build_trace, classify, compute_health, extract};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult, ProviderError};
use crate::explanation::{
    AuthoredExplanation, ExplanationBudget, ExplanationProvider, ExplanationRequest,
    TemplateExplainer,
};
use crate::models::{Assessment, Decision, ExtractedRecord};

/// Evaluates payroll entries and produces compliance decisions.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wcp_compliance::compliance::RateTable;
/// use wcp_compliance::engine::ComplianceEngine;
/// use wcp_compliance::models::DecisionStatus;
///
/// # #[tokio::main]
/// # async fn main() {
/// let engine = ComplianceEngine::deterministic(Arc::new(RateTable::default()));
/// let decision = engine
///     .evaluate("Role: Electrician, Hours: 45, Wage: $55.00")
///     .await
///     .unwrap();
///
/// assert_eq!(decision.status, DecisionStatus::Revise);
/// assert_eq!(decision.trace.len(), 5);
/// # }
/// ```
#[derive(Clone)]
pub struct ComplianceEngine {
    validator: Validator,
    explainer: Arc<dyn ExplanationProvider>,
    budget: ExplanationBudget,
}

impl ComplianceEngine {
    /// Creates an engine from its collaborators.
    pub fn new(
        rates: Arc<dyn RateSource>,
        explainer: Arc<dyn ExplanationProvider>,
        budget: ExplanationBudget,
    ) -> Self {
        Self {
            validator: Validator::new(rates),
            explainer,
            budget,
        }
    }

    /// Creates an engine that always uses the template explanation.
    pub fn deterministic(rates: Arc<dyn RateSource>) -> Self {
        Self::new(rates, Arc::new(TemplateExplainer), ExplanationBudget::default())
    }

    /// Creates an engine from loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> EngineResult<Self> {
        Ok(Self::new(
            config.rate_table(),
            config.explanation_provider()?,
            config.budget(),
        ))
    }

    /// Returns the name of the configured explanation provider.
    pub fn provider_name(&self) -> &'static str {
        self.explainer.name()
    }

    /// Returns the default explanation budget.
    pub fn budget(&self) -> ExplanationBudget {
        self.budget
    }

    /// Extracts, validates and classifies a raw entry without writing an
    /// explanation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::Extraction`] when the entry cannot
    /// be parsed.
    pub fn assess(&self, raw: &str) -> EngineResult<Assessment> {
        let record = extract(raw)?;
        Ok(self.assess_record(record))
    }

    /// Validates and classifies an already structured record.
    pub fn assess_record(&self, record: ExtractedRecord) -> Assessment {
        let outcome = self.validator.validate(&record);
        let status = classify(&outcome.findings);
        Assessment {
            record,
            findings: outcome.findings,
            status,
        }
    }

    /// Evaluates a raw entry using the engine's default budget.
    pub async fn evaluate(&self, raw: &str) -> EngineResult<Decision> {
        self.evaluate_with_budget(raw, self.budget).await
    }

    /// Evaluates a raw entry with an explicit explanation budget.
    ///
    /// Extraction failures are returned immediately. Explanation failures are
    /// never returned; the template explanation is used instead.
    pub async fn evaluate_with_budget(
        &self,
        raw: &str,
        budget: ExplanationBudget,
    ) -> EngineResult<Decision> {
        let start = Instant::now();
        let assessment = self.assess(raw)?;
        Ok(self.decide(start, assessment, budget).await)
    }

    /// Evaluates an already structured record.
    pub async fn evaluate_record(
        &self,
        record: ExtractedRecord,
        budget: ExplanationBudget,
    ) -> Decision {
        let start = Instant::now();
        let assessment = self.assess_record(record);
        self.decide(start, assessment, budget).await
    }

    /// Evaluates many raw entries concurrently, each with its own budget.
    ///
    /// Returns one result per entry, in input order. A failing entry never
    /// affects the others.
    pub async fn evaluate_batch<I, S>(&self, entries: I) -> Vec<EngineResult<Decision>>
    where
        I: IntoIterator<Item = (S, ExplanationBudget)>,
        S: Into<String>,
    {
        let mut tasks = JoinSet::new();
        let mut count = 0;
        for (index, (content, budget)) in entries.into_iter().enumerate() {
            let engine = self.clone();
            let content: String = content.into();
            tasks.spawn(async move {
                (index, engine.evaluate_with_budget(&content, budget).await)
            });
            count += 1;
        }

        let mut slots: Vec<Option<EngineResult<Decision>>> = (0..count).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(err) => warn!(error = %err, "Batch evaluation task failed"),
            }
        }

        let results: Vec<EngineResult<Decision>> = slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(EngineError::Internal {
                        message: "batch evaluation task did not complete".to_string(),
                    })
                })
            })
            .collect();

        info!(
            total = results.len(),
            successful = results.iter().filter(|r| r.is_ok()).count(),
            "Batch evaluation completed"
        );
        results
    }

    async fn decide(
        &self,
        start: Instant,
        assessment: Assessment,
        budget: ExplanationBudget,
    ) -> Decision {
        let authored = self.explain(&assessment, budget).await;
        let trace = build_trace();
        let end = Instant::now();
        let health = compute_health(
            start,
            end,
            authored.token_usage,
            &assessment.findings,
            assessment.status,
        );

        info!(
            status = %assessment.status,
            role = %assessment.record.role,
            findings = assessment.findings.len(),
            explanation_source = ?authored.source,
            token_usage = authored.token_usage,
            duration_us = end.saturating_duration_since(start).as_micros() as u64,
            "Compliance decision generated"
        );

        Decision {
            decision_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            status: assessment.status,
            explanation: authored.text,
            explanation_source: authored.source,
            record: assessment.record,
            findings: assessment.findings,
            trace,
            health,
        }
    }

    async fn explain(
        &self,
        assessment: &Assessment,
        budget: ExplanationBudget,
    ) -> AuthoredExplanation {
        let request = ExplanationRequest {
            record: &assessment.record,
            findings: &assessment.findings,
            status: assessment.status,
            max_steps: budget.max_steps,
        };

        let result = tokio::time::timeout(budget.timeout, self.explainer.author(&request))
            .await
            .unwrap_or(Err(ProviderError::Timeout {
                timeout_ms: budget.timeout.as_millis() as u64,
            }));

        match result {
            Ok(authored) => {
                debug!(
                    provider = self.explainer.name(),
                    token_usage = authored.token_usage,
                    "Explanation authored"
                );
                authored
            }
            Err(err) => {
                warn!(
                    provider = self.explainer.name(),
                    error = %err,
                    "Explanation provider failed, falling back to template"
                );
                TemplateExplainer::explain(&request)
            }
        }
    }
}

impl std::fmt::Debug for ComplianceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceEngine")
            .field("provider", &self.explainer.name())
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}
