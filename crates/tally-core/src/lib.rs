//! # tally-core
//!
//! Core types and collaborator traits for Tally.
//!
//! This crate provides the foundational types shared across all Tally crates:
//! - Entity structs for the project-finance records (projects, budget periods,
//!   participation records, employees, evidence items)
//! - Status and category enums
//! - Date-range arithmetic (overlap, intersection, whole-month counting)
//! - Validation result, report, and fix types
//! - The storage boundary (`SnapshotLoader`, `FixWriter`, `FixTransaction`)
//! - Cross-cutting error types and CLI/HTTP response envelopes
//! - The fix trail record appended after committed corrections

pub mod dataset;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod period;
pub mod report;
pub mod responses;
pub mod store;
pub mod trail;

/// Monetary amount in the currency's minor unit.
///
/// Amounts are rounded upstream, so all reconciliation arithmetic on money is
/// integral.
pub type Money = i64;
