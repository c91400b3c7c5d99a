//! Extracted payroll record model.
//!
//! This module defines the [`ExtractedRecord`] produced by the field extractor
//! and the numeric bounds every record is expected to respect.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lowest number of hours a record may report.
pub const MIN_HOURS: Decimal = Decimal::ZERO;

/// Highest number of hours a record may report (hours in a week).
pub const MAX_HOURS: Decimal = Decimal::from_parts(168, 0, 0, false, 0);

/// Lowest hourly wage a record may report.
pub const MIN_WAGE: Decimal = Decimal::ZERO;

/// Highest hourly wage a record may report.
pub const MAX_WAGE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// The structured fields of a single certified-payroll entry.
///
/// Records produced by the extractor always satisfy the bounds above. Records
/// built directly (for example from a structured API request) may not; the
/// validator reports those as `InvalidFormat` findings.
///
/// # Example
///
/// ```
/// use wcp_compliance::models::ExtractedRecord;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = ExtractedRecord {
///     role: "Electrician".to_string(),
///     hours: Decimal::from_str("40").unwrap(),
///     wage: Decimal::from_str("55.00").unwrap(),
/// };
/// assert!(record.is_within_bounds());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// The worker's trade classification (e.g., "Electrician").
    pub role: String,
    /// Hours reported for the certification window.
    pub hours: Decimal,
    /// Hourly wage paid.
    pub wage: Decimal,
}

impl ExtractedRecord {
    /// Creates a new record.
    pub fn new(role: impl Into<String>, hours: Decimal, wage: Decimal) -> Self {
        Self {
            role: role.into(),
            hours,
            wage,
        }
    }

    /// Formats the wage for display with at least two decimal places.
    ///
    /// Extra precision from the submission is kept, never rounded away.
    pub fn wage_display(&self) -> String {
        let mut wage = self.wage.normalize();
        if wage.scale() < 2 {
            wage.rescale(2);
        }
        wage.to_string()
    }

    /// Returns true if hours and wage fall inside their bounds and the role is non-empty.
    pub fn is_within_bounds(&self) -> bool {
        !self.role.trim().is_empty()
            && (MIN_HOURS..=MAX_HOURS).contains(&self.hours)
            && (MIN_WAGE..=MAX_WAGE).contains(&self.wage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_record_at_upper_bounds_is_valid() {
        let record = ExtractedRecord::new("Laborer", dec("168"), dec("1000"));
        assert!(record.is_within_bounds());
    }

    #[test]
    fn test_record_with_negative_hours_is_out_of_bounds() {
        let record = ExtractedRecord::new("Laborer", dec("-1"), dec("30"));
        assert!(!record.is_within_bounds());
    }

    #[test]
    fn test_record_with_excessive_wage_is_out_of_bounds() {
        let record = ExtractedRecord::new("Laborer", dec("40"), dec("1000.01"));
        assert!(!record.is_within_bounds());
    }

    #[test]
    fn test_record_with_blank_role_is_out_of_bounds() {
        let record = ExtractedRecord::new("  ", dec("40"), dec("30"));
        assert!(!record.is_within_bounds());
    }

    #[test]
    fn test_record_deserializes_from_json_numbers_and_strings() {
        let record: ExtractedRecord =
            serde_json::from_str(r#"{"role": "Electrician", "hours": 45, "wage": "55.00"}"#)
                .unwrap();
        assert_eq!(record.role, "Electrician");
        assert_eq!(record.hours, dec("45"));
        assert_eq!(record.wage, dec("55.00"));
    }

    #[test]
    fn test_wage_display_pads_to_cents() {
        let whole = ExtractedRecord::new("Laborer", dec("40"), dec("30"));
        assert_eq!(whole.wage_display(), "30.00");

        let one_place = ExtractedRecord::new("Laborer", dec("40"), dec("26.5"));
        assert_eq!(one_place.wage_display(), "26.50");
    }

    #[test]
    fn test_wage_display_keeps_submitted_precision() {
        let record = ExtractedRecord::new("Laborer", dec("40"), dec("26.449"));
        assert_eq!(record.wage_display(), "26.449");
    }
}
