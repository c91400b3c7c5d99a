//! Summary statistics over a set of decisions.

use serde::{Deserialize, Serialize};

use super::{Decision, DecisionStatus};

/// Status counts and averaged health metrics for a set of decisions.
///
/// # Example
///
/// ```
/// use wcp_compliance::models::DecisionStats;
///
/// let stats = DecisionStats::from_decisions(&[]);
/// assert_eq!(stats.total, 0);
/// assert_eq!(stats.avg_confidence, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DecisionStats {
    /// Number of decisions.
    pub total: usize,
    /// Decisions with status `Approved`.
    pub approved: usize,
    /// Decisions with status `Revise`.
    pub revise: usize,
    /// Decisions with status `Reject`.
    pub reject: usize,
    /// Mean confidence; zero when there are no decisions.
    pub avg_confidence: f64,
    /// Mean cycle time in milliseconds; zero when there are no decisions.
    pub avg_cycle_time_ms: f64,
}

impl DecisionStats {
    /// Summarizes the given decisions.
    pub fn from_decisions<'a, I>(decisions: I) -> Self
    where
        I: IntoIterator<Item = &'a Decision>,
    {
        let mut stats = Self::default();
        let mut confidence_sum = 0.0;
        let mut cycle_time_sum = 0u64;

        for decision in decisions {
            stats.total += 1;
            match decision.status {
                DecisionStatus::Approved => stats.approved += 1,
                DecisionStatus::Revise => stats.revise += 1,
                DecisionStatus::Reject => stats.reject += 1,
            }
            confidence_sum += decision.health.confidence;
            cycle_time_sum = cycle_time_sum.saturating_add(decision.health.cycle_time_ms);
        }

        if stats.total > 0 {
            stats.avg_confidence = confidence_sum / stats.total as f64;
            stats.avg_cycle_time_ms = cycle_time_sum as f64 / stats.total as f64;
        }
        stats
    }
}
