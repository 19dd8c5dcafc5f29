//! Database location and fix-trail configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".tally/tally.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// libSQL database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Directory for the JSONL fix trail. Empty disables the trail.
    #[serde(default)]
    pub trail_dir: String,
}

impl DatabaseConfig {
    /// Whether committed fixes are mirrored to a JSONL trail.
    #[must_use]
    pub const fn trail_enabled(&self) -> bool {
        !self.trail_dir.is_empty()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            trail_dir: String::new(),
        }
    }
}
