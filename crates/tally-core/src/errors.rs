//! Cross-cutting error types for Tally.
//!
//! Domain-specific errors (`DatabaseError`, `EngineError`, ...) live in their
//! respective crates. A unified error is deferred to `tally-cli` where all crate
//! errors converge into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Tally crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, bounds, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
