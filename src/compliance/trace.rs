//! Audit trace construction.
//!
//! The trace describes the pipeline stages that ran, not the findings. It is
//! always the same five entries in the same order.

/// Number of entries in every audit trace.
pub const TRACE_LENGTH: usize = 5;

const STAGES: [&str; TRACE_LENGTH] = [
    "Step 1: Extracted role, hours and wage from the payroll entry",
    "Step 2: Checked role against the wage determination rate table",
    "Step 3: Checked wage against the base rate",
    "Step 4: Checked hours against the 40-hour overtime threshold",
    "Step 5: Generated compliance decision",
];

/// Builds the audit trace for an evaluation.
///
/// # Example
///
/// ```
/// use wcp_compliance::compliance::{build_trace, TRACE_LENGTH};
///
/// let trace = build_trace();
/// assert_eq!(trace.len(), TRACE_LENGTH);
/// assert!(trace[0].starts_with("Step 1"));
/// ```
pub fn build_trace() -> Vec<String> {
    STAGES.iter().map(|stage| stage.to_string()).collect()
}
