//! Compliance logic for the WCP compliance engine.
//!
//! This module contains the deterministic pipeline: field extraction from raw
//! payroll text, the prevailing-wage rate table, rule validation, decision
//! synthesis, audit-trace construction and health-metric computation.

mod decision;
mod extraction;
mod health;
mod rate_table;
mod trace;
mod validator;

pub use decision::{Synthesis, classify, compose_explanation, synthesize};
pub use extraction::{MAX_INPUT_LENGTH, MIN_INPUT_LENGTH, extract};
pub use health::{
    CLEAN_VALIDATION_SCORE, FLAGGED_VALIDATION_SCORE, compute_health, confidence_for,
};
pub use rate_table::{RateEntry, RateSource, RateTable};
pub use trace::{TRACE_LENGTH, build_trace};
pub use validator::{OVERTIME_THRESHOLD_HOURS, ValidationOutcome, Validator, validate};
