//! # tally-schema
//!
//! JSON Schema generation, validation, and registry for Tally.
//!
//! Entity, report, and trail types are defined in `tally-core` with
//! `#[derive(JsonSchema)]`. This crate collects them into a
//! [`SchemaRegistry`] used to check imported datasets and to export schemas
//! through `tally schema`.

pub mod error;
pub mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
