//! Engine error taxonomy.
//!
//! Consistency violations are not errors: they come back as
//! `ValidationResult { is_valid: false, .. }`. `EngineError` covers bad input
//! and collaborator failures only.

use tally_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Missing or malformed input, rejected before any validator runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The project's snapshot could not be loaded.
    #[error("failed to load project {project_id}: {source}")]
    Load {
        project_id: String,
        #[source]
        source: StoreError,
    },

    /// A corrective write failed and the project's transaction rolled back.
    #[error("auto-fix for project {project_id} rolled back: {source}")]
    Fix {
        project_id: String,
        #[source]
        source: StoreError,
    },

    /// A storage call not scoped to one project failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// HTTP status the boundary maps this error onto.
    ///
    /// Bad input and unknown ids are the caller's fault (400); everything
    /// else is a server-side failure (500).
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_)
            | Self::Load {
                source: StoreError::NotFound { .. },
                ..
            }
            | Self::Store(StoreError::NotFound { .. }) => 400,
            Self::Load { .. } | Self::Fix { .. } | Self::Store(_) => 500,
        }
    }
}
