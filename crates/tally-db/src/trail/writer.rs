//! JSONL fix trail writer.
//!
//! Appends `FixTrailEntry` records to per-project `{trail_dir}/{project_id}.jsonl`
//! files. Uses `serde_jsonlines::append_json_lines` for per-line appends.

use std::path::{Path, PathBuf};

use tally_core::trail::FixTrailEntry;

use crate::error::DatabaseError;

/// Appends committed fixes to per-project JSONL files.
///
/// Cheap to clone; each fix transaction carries its own copy.
#[derive(Debug, Clone)]
pub struct FixTrail {
    trail_dir: PathBuf,
    enabled: bool,
}

impl FixTrail {
    /// Create a trail writer pointing at the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created.
    pub fn new(trail_dir: PathBuf) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&trail_dir).map_err(|e| DatabaseError::Other(e.into()))?;
        Ok(Self {
            trail_dir,
            enabled: true,
        })
    }

    /// Create a disabled writer (for testing or when no trail is configured).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            trail_dir: PathBuf::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append entries to the project's JSONL file.
    ///
    /// Entries are grouped by `project_id`; an empty slice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file write fails.
    pub fn append(&self, entries: &[FixTrailEntry]) -> Result<(), DatabaseError> {
        if !self.enabled || entries.is_empty() {
            return Ok(());
        }

        for entry in entries {
            serde_jsonlines::append_json_lines(self.path_for(&entry.project_id), [entry])
                .map_err(|e| DatabaseError::Other(e.into()))?;
        }
        Ok(())
    }

    /// File holding one project's trail.
    #[must_use]
    pub fn path_for(&self, project_id: &str) -> PathBuf {
        self.trail_dir.join(format!("{project_id}.jsonl"))
    }

    /// The directory where trail files are stored.
    #[must_use]
    pub fn trail_dir(&self) -> &Path {
        &self.trail_dir
    }
}
