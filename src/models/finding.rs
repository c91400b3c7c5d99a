//! Compliance finding model.
//!
//! A [`Finding`] is a single compliance issue detected by the validator.

use serde::{Deserialize, Serialize};

/// The kind of compliance issue a finding records.
///
/// Variants are declared in the order the validator emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FindingKind {
    /// A record field was missing, empty, or outside its bounds.
    InvalidFormat,
    /// The role has no entry in the wage determination.
    UnknownRole,
    /// More than 40 hours were reported.
    Overtime,
    /// The wage is below the base rate for the role.
    Underpay,
}

impl FindingKind {
    /// Returns the kind's canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::InvalidFormat => "InvalidFormat",
            FindingKind::UnknownRole => "UnknownRole",
            FindingKind::Overtime => "Overtime",
            FindingKind::Underpay => "Underpay",
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected compliance issue.
///
/// # Example
///
/// ```
/// use wcp_compliance::models::{Finding, FindingKind};
///
/// let finding = Finding::new(FindingKind::Overtime, "45 exceeds 40; 1.5× pay required for the excess");
/// assert_eq!(finding.kind, FindingKind::Overtime);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// What kind of issue this is.
    pub kind: FindingKind,
    /// Human-readable description of the issue.
    pub detail: String,
}

impl Finding {
    /// Creates a new finding.
    pub fn new(kind: FindingKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}
