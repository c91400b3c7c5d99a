//! Prevailing-wage rate table.
//!
//! This module provides the read-only [`RateTable`] mapping a role to its
//! base and fringe rates, and the [`RateSource`] capability the validator
//! depends on.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Base and fringe rates for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Minimum hourly wage for the role.
    pub base_rate: Decimal,
    /// Supplemental benefit rate, tracked but not enforced.
    pub fringe_rate: Decimal,
}

/// A read-only provider of rates by role.
///
/// Lookups are exact and case-sensitive. A miss is a normal outcome, not an
/// error.
pub trait RateSource: Send + Sync {
    /// Looks up the rates for a role.
    fn lookup(&self, role: &str) -> Option<RateEntry>;
}

/// An immutable role → rate table.
///
/// # Example
///
/// ```
/// use wcp_compliance::compliance::{RateSource, RateTable};
///
/// let table = RateTable::default();
/// assert!(table.lookup("Electrician").is_some());
/// assert!(table.lookup("electrician").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    entries: BTreeMap<String, RateEntry>,
}

impl RateTable {
    /// Creates a table from role/rate pairs.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, RateEntry)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(role, entry)| (role.into(), entry))
                .collect(),
        }
    }

    /// Returns the roles in the table, sorted.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over roles and their rates, sorted by role.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RateEntry)> {
        self.entries.iter().map(|(role, entry)| (role.as_str(), entry))
    }

    /// Returns the number of roles in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no roles.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateTable {
    /// The built-in wage determination: Electrician and Laborer.
    fn default() -> Self {
        Self::new([
            (
                "Electrician",
                RateEntry {
                    base_rate: Decimal::new(5169, 2),
                    fringe_rate: Decimal::new(3463, 2),
                },
            ),
            (
                "Laborer",
                RateEntry {
                    base_rate: Decimal::new(2645, 2),
                    fringe_rate: Decimal::new(1250, 2),
                },
            ),
        ])
    }
}

impl RateSource for RateTable {
    fn lookup(&self, role: &str) -> Option<RateEntry> {
        self.entries.get(role).copied()
    }
}
