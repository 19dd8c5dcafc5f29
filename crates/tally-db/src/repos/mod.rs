//! Repository modules for Tally's records.
//!
//! Each module adds read methods to `TallyService` via `impl TallyService`
//! blocks, plus a crate-level insert function that runs against any
//! connection (including an open import transaction).

pub mod budget;
pub mod dataset;
pub mod employee;
pub mod evidence;
pub mod member;
pub mod project;
