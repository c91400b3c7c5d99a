//! Field extraction from raw payroll text.
//!
//! This module locates the labeled `Role:`, `Hours:` and `Wage:` fields in a
//! free-text certified-payroll entry and turns them into an
//! [`ExtractedRecord`]. Extraction is a pure function of the input text.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::models::{ExtractedRecord, MAX_HOURS, MAX_WAGE, MIN_HOURS, MIN_WAGE};

/// Minimum accepted length of a payroll entry, in characters.
pub const MIN_INPUT_LENGTH: usize = 10;

/// Maximum accepted length of a payroll entry, in characters.
pub const MAX_INPUT_LENGTH: usize = 10_000;

// A label only counts when followed by `:` or `=`, so the bare words in prose
// ("total hours worked") are skipped. Digit groups after a comma stay in the
// captured value so "1,000" is rejected instead of read as 1.
static ROLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\brole\s*[:=]\s*([A-Za-z][A-Za-z0-9_\-]*)").expect("invalid role pattern")
});

static HOURS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bhours\s*[:=]\s*([^\s,;|/]+(?:,[0-9][^\s,;|/]*)*)")
        .expect("invalid hours pattern")
});

static WAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bwage\s*[:=]\s*\$?\s*([^\s,;|/$]+(?:,[0-9][^\s,;|/$]*)*)")
        .expect("invalid wage pattern")
});

/// Extracts role, hours and wage from a raw payroll entry.
///
/// Fields are matched case-insensitively by label, and a label must be
/// followed by `:` or `=`. Separators between fields may be commas,
/// semicolons, pipes or newlines, and the wage may carry a leading `$` or a
/// trailing `/hr`. Values are plain decimals: digit grouping (`1,000`) and
/// exponents (`1e2`) are rejected.
///
/// # Errors
///
/// - [`ExtractionError::InputTooShort`] when the text is under [`MIN_INPUT_LENGTH`]
/// - [`ExtractionError::InputTooLong`] when the text exceeds [`MAX_INPUT_LENGTH`]
/// - [`ExtractionError::MissingField`] when a label or its value is absent
/// - [`ExtractionError::NonNumeric`] when hours or wage is not a number
/// - [`ExtractionError::OutOfRange`] when hours is outside [0, 168] or wage
///   is outside [0, 1000]
///
/// # Examples
///
/// ```
/// use wcp_compliance::compliance::extract;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = extract("Role: Electrician, Hours: 45, Wage: $55.00").unwrap();
/// assert_eq!(record.role, "Electrician");
/// assert_eq!(record.hours, Decimal::from_str("45").unwrap());
/// assert_eq!(record.wage, Decimal::from_str("55.00").unwrap());
/// ```
pub fn extract(text: &str) -> Result<ExtractedRecord, ExtractionError> {
    let length = text.chars().count();
    if length < MIN_INPUT_LENGTH {
        return Err(ExtractionError::InputTooShort {
            length,
            min: MIN_INPUT_LENGTH,
        });
    }
    if length > MAX_INPUT_LENGTH {
        return Err(ExtractionError::InputTooLong {
            length,
            max: MAX_INPUT_LENGTH,
        });
    }

    let role = capture(&ROLE_PATTERN, text, "role")?.to_string();
    let hours = parse_bounded(
        capture(&HOURS_PATTERN, text, "hours")?,
        "hours",
        MIN_HOURS,
        MAX_HOURS,
    )?;
    let wage = parse_bounded(
        capture(&WAGE_PATTERN, text, "wage")?,
        "wage",
        MIN_WAGE,
        MAX_WAGE,
    )?;

    Ok(ExtractedRecord { role, hours, wage })
}

fn capture<'t>(
    pattern: &Regex,
    text: &'t str,
    field: &'static str,
) -> Result<&'t str, ExtractionError> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ExtractionError::MissingField { field })
}

fn parse_bounded(
    raw: &str,
    field: &'static str,
    min: Decimal,
    max: Decimal,
) -> Result<Decimal, ExtractionError> {
    // "45." at the end of a sentence
    let token = raw.strip_suffix('.').unwrap_or(raw);
    let non_numeric = || ExtractionError::NonNumeric {
        field,
        value: raw.to_string(),
    };

    if !token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
    {
        return Err(non_numeric());
    }
    let value = Decimal::from_str(token).map_err(|_| non_numeric())?;

    if value < min || value > max {
        return Err(ExtractionError::OutOfRange {
            field,
            value: value.normalize().to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }

    Ok(value)
}
