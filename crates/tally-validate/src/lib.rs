//! # tally-validate
//!
//! The compliance validation engine.
//!
//! Validators are pure functions over a [`ProjectSnapshot`]: they never touch
//! storage. The [`Orchestrator`] loads snapshots through a
//! [`SnapshotLoader`](tally_core::store::SnapshotLoader), runs the requested
//! validators, and in auto-fix mode applies their planned corrections inside
//! one [`FixTransaction`](tally_core::store::FixTransaction) per project.
//!
//! ```text
//! SnapshotLoader -> ProjectSnapshot -> Validator::evaluate -> ValidationReport
//!                                   -> Validator::plan_fixes -> FixTransaction
//! ```

pub mod error;
pub mod orchestrator;
pub mod snapshot;
pub mod validator;
pub mod validators;

#[cfg(test)]
mod test_support;

pub use error::EngineError;
pub use orchestrator::Orchestrator;
pub use snapshot::ProjectSnapshot;
pub use validator::{Validator, ValidatorRegistry, ValidatorSelection};
