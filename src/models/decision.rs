//! Compliance decision models.
//!
//! This module contains the [`Decision`] returned for every evaluated payroll
//! entry, together with its status and health metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ExtractedRecord, Finding};

/// The outcome of a compliance evaluation.
///
/// Serialized as exactly `"Approved"`, `"Revise"` or `"Reject"` regardless of
/// which explanation provider ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionStatus {
    /// No findings.
    Approved,
    /// Only correctable findings (overtime).
    Revise,
    /// At least one blocking finding.
    Reject,
}

impl DecisionStatus {
    /// Returns the status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Approved => "Approved",
            DecisionStatus::Revise => "Revise",
            DecisionStatus::Reject => "Reject",
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which provider authored the explanation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    /// The deterministic template.
    Template,
    /// A language-model provider.
    LanguageModel,
}

/// Timing, usage and quality metrics for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// Wall time of the whole evaluation in milliseconds.
    pub cycle_time_ms: u64,
    /// Language-model tokens consumed; zero for the template.
    pub token_usage: u64,
    /// 1.0 with no findings, 0.8 otherwise.
    pub validation_score: f64,
    /// Fixed confidence keyed by status.
    pub confidence: f64,
}

/// The outcome of extraction, validation and classification, before any
/// explanation is authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// The record that was validated.
    pub record: ExtractedRecord,
    /// Findings in emission order.
    pub findings: Vec<Finding>,
    /// Status derived from the findings.
    pub status: DecisionStatus,
}

/// The complete compliance decision for one payroll entry.
///
/// `status` is determined solely by `findings`; `explanation` never affects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Unique identifier for this decision.
    pub decision_id: Uuid,
    /// When the decision was produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the decision.
    pub engine_version: String,
    /// The compliance outcome.
    pub status: DecisionStatus,
    /// Human-readable justification.
    pub explanation: String,
    /// Which provider wrote `explanation`.
    pub explanation_source: ExplanationSource,
    /// The record the decision is about.
    pub record: ExtractedRecord,
    /// Detected issues in a fixed order.
    pub findings: Vec<Finding>,
    /// Pipeline stages executed, always five entries.
    pub trace: Vec<String>,
    /// Timing and quality metrics.
    pub health: HealthMetrics,
}
