//! Health metrics for an evaluation.

use std::time::Instant;

use crate::models::{DecisionStatus, Finding, HealthMetrics};

/// Validation score when no findings were produced.
pub const CLEAN_VALIDATION_SCORE: f64 = 1.0;

/// Validation score when at least one finding was produced.
pub const FLAGGED_VALIDATION_SCORE: f64 = 0.8;

/// Returns the fixed confidence for a status.
pub fn confidence_for(status: DecisionStatus) -> f64 {
    match status {
        DecisionStatus::Approved => 0.95,
        DecisionStatus::Revise => 0.85,
        DecisionStatus::Reject => 0.90,
    }
}

/// Computes health metrics for one evaluation.
///
/// `start` and `end` come from a monotonic clock; an `end` earlier than
/// `start` yields a zero cycle time.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use wcp_compliance::compliance::compute_health;
/// use wcp_compliance::models::DecisionStatus;
///
/// let start = Instant::now();
/// let end = start + Duration::from_millis(12);
/// let health = compute_health(start, end, 0, &[], DecisionStatus::Approved);
///
/// assert_eq!(health.cycle_time_ms, 12);
/// assert_eq!(health.validation_score, 1.0);
/// assert_eq!(health.confidence, 0.95);
/// ```
pub fn compute_health(
    start: Instant,
    end: Instant,
    token_usage: u64,
    findings: &[Finding],
    status: DecisionStatus,
) -> HealthMetrics {
    let cycle_time_ms = end.saturating_duration_since(start).as_millis() as u64;

    let validation_score = if findings.is_empty() {
        CLEAN_VALIDATION_SCORE
    } else {
        FLAGGED_VALIDATION_SCORE
    };

    HealthMetrics {
        cycle_time_ms,
        token_usage,
        validation_score,
        confidence: confidence_for(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FindingKind;
    use std::time::Duration;

    #[test]
    fn test_flagged_score_with_findings() {
        let start = Instant::now();
        let findings = vec![Finding::new(FindingKind::Overtime, "45 exceeds 40")];
        let health = compute_health(start, start, 0, &findings, DecisionStatus::Revise);

        assert_eq!(health.validation_score, FLAGGED_VALIDATION_SCORE);
        assert_eq!(health.confidence, 0.85);
    }

    #[test]
    fn test_reject_confidence() {
        assert_eq!(confidence_for(DecisionStatus::Reject), 0.90);
    }

    #[test]
    fn test_token_usage_is_passed_through() {
        let start = Instant::now();
        let health = compute_health(start, start, 412, &[], DecisionStatus::Approved);
        assert_eq!(health.token_usage, 412);
    }

    #[test]
    fn test_reversed_clock_saturates_to_zero() {
        let end = Instant::now();
        let start = end + Duration::from_millis(5);
        let health = compute_health(start, end, 0, &[], DecisionStatus::Approved);
        assert_eq!(health.cycle_time_ms, 0);
    }
}
