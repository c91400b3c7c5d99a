//! Compliance validation against the wage determination.
//!
//! This module applies the compliance rules to an [`ExtractedRecord`] and
//! produces the ordered list of [`Finding`]s. Rules run independently and in
//! a fixed order:
//!
//! 1. record bounds (`InvalidFormat`)
//! 2. role lookup (`UnknownRole`)
//! 3. weekly overtime (`Overtime`)
//! 4. base rate (`Underpay`), only for roles present in the table

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    ExtractedRecord, Finding, FindingKind, MAX_HOURS, MAX_WAGE, MIN_HOURS, MIN_WAGE,
};

use super::rate_table::RateSource;

/// Hours above which 1.5× pay is required for the excess.
pub const OVERTIME_THRESHOLD_HOURS: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// The findings produced for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Findings in rule order.
    pub findings: Vec<Finding>,
    /// True when no rule fired.
    pub is_valid: bool,
}

/// Applies the compliance rules using an injected rate source.
#[derive(Clone)]
pub struct Validator {
    rates: Arc<dyn RateSource>,
}

impl Validator {
    /// Creates a validator over the given rate source.
    pub fn new(rates: Arc<dyn RateSource>) -> Self {
        Self { rates }
    }

    /// Validates a record against this validator's rate source.
    pub fn validate(&self, record: &ExtractedRecord) -> ValidationOutcome {
        validate(record, self.rates.as_ref())
    }

    /// Returns the rate source this validator checks against.
    pub fn rates(&self) -> &dyn RateSource {
        self.rates.as_ref()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

/// Validates a record against a rate source.
///
/// Never fails. Boundaries use strict inequalities: exactly 40 hours is not
/// overtime and a wage equal to the base rate is not underpayment. An unknown
/// role still gets the overtime check but never the underpay check.
///
/// # Examples
///
/// ```
/// use wcp_compliance::compliance::{validate, RateTable};
/// use wcp_compliance::models::{ExtractedRecord, FindingKind};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = ExtractedRecord::new(
///     "Electrician",
///     Decimal::from_str("45").unwrap(),
///     Decimal::from_str("30.00").unwrap(),
/// );
/// let outcome = validate(&record, &RateTable::default());
///
/// let kinds: Vec<FindingKind> = outcome.findings.iter().map(|f| f.kind).collect();
/// assert_eq!(kinds, vec![FindingKind::Overtime, FindingKind::Underpay]);
/// assert!(!outcome.is_valid);
/// ```
pub fn validate(record: &ExtractedRecord, rates: &dyn RateSource) -> ValidationOutcome {
    let mut findings = format_findings(record);

    let rate = rates.lookup(&record.role);
    if rate.is_none() {
        findings.push(Finding::new(
            FindingKind::UnknownRole,
            format!("role '{}' not found in rate table", record.role),
        ));
    }

    if record.hours > OVERTIME_THRESHOLD_HOURS {
        findings.push(Finding::new(
            FindingKind::Overtime,
            format!(
                "{} exceeds {}; 1.5× pay required for the excess",
                record.hours.normalize(),
                OVERTIME_THRESHOLD_HOURS
            ),
        ));
    }

    if let Some(rate) = rate {
        if record.wage < rate.base_rate {
            findings.push(Finding::new(
                FindingKind::Underpay,
                format!(
                    "wage {} below base rate {:.2} (fringe {:.2} tracked separately)",
                    record.wage_display(),
                    rate.base_rate,
                    rate.fringe_rate
                ),
            ));
        }
    }

    let is_valid = findings.is_empty();
    ValidationOutcome { findings, is_valid }
}

fn format_findings(record: &ExtractedRecord) -> Vec<Finding> {
    let mut findings = Vec::new();

    if record.role.trim().is_empty() {
        findings.push(Finding::new(FindingKind::InvalidFormat, "role is empty"));
    }
    if !(MIN_HOURS..=MAX_HOURS).contains(&record.hours) {
        findings.push(Finding::new(
            FindingKind::InvalidFormat,
            format!(
                "hours {} outside [{}, {}]",
                record.hours.normalize(),
                MIN_HOURS,
                MAX_HOURS
            ),
        ));
    }
    if !(MIN_WAGE..=MAX_WAGE).contains(&record.wage) {
        findings.push(Finding::new(
            FindingKind::InvalidFormat,
            format!(
                "wage {} outside [{}, {}]",
                record.wage.normalize(),
                MIN_WAGE,
                MAX_WAGE
            ),
        ));
    }

    findings
}
