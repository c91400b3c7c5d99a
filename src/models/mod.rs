//! Core data models for the WCP compliance engine.
//!
//! This module contains the domain models shared by extraction, validation,
//! decision synthesis and the HTTP API.

mod decision;
mod finding;
mod record;
mod stats;

pub use decision::{Assessment, Decision, DecisionStatus, ExplanationSource, HealthMetrics};
pub use finding::{Finding, FindingKind};
pub use record::{ExtractedRecord, MAX_HOURS, MAX_WAGE, MIN_HOURS, MIN_WAGE};
pub use stats::DecisionStats;
