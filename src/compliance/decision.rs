//! Decision synthesis.
//!
//! This module maps findings to a [`DecisionStatus`] using a fixed severity
//! precedence and composes the deterministic explanation text.

use crate::models::{DecisionStatus, ExtractedRecord, Finding, FindingKind};

/// A status together with the deterministic explanation for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    /// The derived status.
    pub status: DecisionStatus,
    /// The template explanation.
    pub explanation: String,
}

/// Derives the decision status from findings.
///
/// The most severe finding wins: `UnknownRole`, `Underpay` or `InvalidFormat`
/// reject; otherwise `Overtime` asks for revision; otherwise the entry is
/// approved. Only the set of finding kinds matters.
///
/// # Examples
///
/// ```
/// use wcp_compliance::compliance::classify;
/// use wcp_compliance::models::{DecisionStatus, Finding, FindingKind};
///
/// assert_eq!(classify(&[]), DecisionStatus::Approved);
///
/// let findings = vec![
///     Finding::new(FindingKind::Overtime, "45 exceeds 40"),
///     Finding::new(FindingKind::Underpay, "wage below base"),
/// ];
/// assert_eq!(classify(&findings), DecisionStatus::Reject);
/// ```
pub fn classify(findings: &[Finding]) -> DecisionStatus {
    let has = |kind: FindingKind| findings.iter().any(|f| f.kind == kind);

    if has(FindingKind::UnknownRole) || has(FindingKind::Underpay) || has(FindingKind::InvalidFormat)
    {
        DecisionStatus::Reject
    } else if has(FindingKind::Overtime) {
        DecisionStatus::Revise
    } else {
        DecisionStatus::Approved
    }
}

/// Composes the deterministic explanation for a decision.
///
/// The text names the role, hours and wage and quotes every finding's detail,
/// so it is always consistent with the status and findings it was given.
pub fn compose_explanation(
    record: &ExtractedRecord,
    findings: &[Finding],
    status: DecisionStatus,
) -> String {
    let summary = format!(
        "{} reported {} hours at ${}/hr.",
        record.role,
        record.hours.normalize(),
        record.wage_display()
    );

    match status {
        DecisionStatus::Approved => format!(
            "Approved: {} The role is in the wage determination, the wage meets the base rate \
             and no hours exceed 40. No compliance findings.",
            summary
        ),
        DecisionStatus::Revise => format!(
            "Revise: {} The entry must be corrected before approval: {}.",
            summary,
            describe(findings)
        ),
        DecisionStatus::Reject => format!(
            "Reject: {} The entry has blocking compliance violations: {}.",
            summary,
            describe(findings)
        ),
    }
}

/// Classifies findings and composes the template explanation in one step.
pub fn synthesize(record: &ExtractedRecord, findings: &[Finding]) -> Synthesis {
    let status = classify(findings);
    Synthesis {
        status,
        explanation: compose_explanation(record, findings, status),
    }
}

fn describe(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|f| format!("{} ({})", f.kind, f.detail))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn finding(kind: FindingKind) -> Finding {
        Finding::new(kind, format!("{} detail", kind))
    }

    fn record() -> ExtractedRecord {
        ExtractedRecord::new(
            "Electrician",
            Decimal::from_str("45").unwrap(),
            Decimal::from_str("30").unwrap(),
        )
    }

    #[test]
    fn test_no_findings_is_approved() {
        assert_eq!(classify(&[]), DecisionStatus::Approved);
    }

    #[test]
    fn test_overtime_alone_is_revise() {
        assert_eq!(
            classify(&[finding(FindingKind::Overtime)]),
            DecisionStatus::Revise
        );
    }

    #[test]
    fn test_blocking_kinds_reject() {
        for kind in [
            FindingKind::UnknownRole,
            FindingKind::Underpay,
            FindingKind::InvalidFormat,
        ] {
            assert_eq!(classify(&[finding(kind)]), DecisionStatus::Reject);
            assert_eq!(
                classify(&[finding(FindingKind::Overtime), finding(kind)]),
                DecisionStatus::Reject
            );
        }
    }

    #[test]
    fn test_status_ignores_finding_order_and_detail() {
        let a = vec![finding(FindingKind::Underpay), finding(FindingKind::Overtime)];
        let b = vec![
            Finding::new(FindingKind::Overtime, "x"),
            Finding::new(FindingKind::Underpay, "y"),
        ];
        assert_eq!(classify(&a), classify(&b));
    }

    #[test]
    fn test_explanation_quotes_every_finding() {
        let findings = vec![
            Finding::new(FindingKind::Overtime, "45 exceeds 40; 1.5× pay required for the excess"),
            Finding::new(
                FindingKind::Underpay,
                "wage 30.00 below base rate 51.69 (fringe 34.63 tracked separately)",
            ),
        ];
        let synthesis = synthesize(&record(), &findings);

        assert_eq!(synthesis.status, DecisionStatus::Reject);
        assert!(synthesis.explanation.starts_with("Reject: Electrician reported 45 hours at $30.00/hr."));
        for f in &findings {
            assert!(synthesis.explanation.contains(&f.detail));
        }
    }

    #[test]
    fn test_approved_explanation_mentions_record() {
        let record = ExtractedRecord::new(
            "Laborer",
            Decimal::from_str("40").unwrap(),
            Decimal::from_str("30").unwrap(),
        );
        let explanation = compose_explanation(&record, &[], DecisionStatus::Approved);
        assert!(explanation.starts_with("Approved: Laborer reported 40 hours at $30.00/hr."));
        assert!(explanation.contains("No compliance findings"));
    }

    #[test]
    fn test_revise_explanation_names_overtime() {
        let findings = vec![finding(FindingKind::Overtime)];
        let synthesis = synthesize(&record(), &findings);
        assert_eq!(synthesis.status, DecisionStatus::Revise);
        assert!(synthesis.explanation.contains("Overtime (Overtime detail)"));
    }

    #[test]
    fn test_explanation_keeps_sub_cent_wage() {
        let record = ExtractedRecord::new(
            "Laborer",
            Decimal::from_str("40").unwrap(),
            Decimal::from_str("26.449").unwrap(),
        );
        let findings = vec![Finding::new(
            FindingKind::Underpay,
            "wage 26.449 below base rate 26.45 (fringe 12.50 tracked separately)",
        )];
        let explanation = compose_explanation(&record, &findings, DecisionStatus::Reject);
        assert!(explanation.starts_with("Reject: Laborer reported 40 hours at $26.449/hr."));
    }
}
