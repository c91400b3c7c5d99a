//! Compliance Decision Engine for certified payroll (WCP) entries
//!
//! This crate extracts role, hours and wage from a free-text payroll entry,
//! checks them against a prevailing-wage rate table, and produces an auditable
//! decision (`Approved`, `Revise` or `Reject`) with findings, an explanation,
//! a fixed audit trace and health metrics.

#![warn(missing_docs)]

pub mod api;
pub mod compliance;
pub mod config;
pub mod engine;
pub mod error;
pub mod explanation;
pub mod models;
