//! Fix trail record.
//!
//! Every committed corrective write is appended as one JSON line to
//! `{trail_dir}/{project_id}.jsonl`, giving an append-only history of what
//! auto-fix changed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, FixField};
use crate::report::FixValue;

/// One line of the fix trail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FixTrailEntry {
    /// Format version, currently 1.
    pub v: u8,
    /// RFC 3339 timestamp of the commit.
    pub ts: String,
    pub project_id: String,
    pub entity: EntityType,
    pub id: String,
    pub field: FixField,
    pub value: FixValue,
    /// Version the entity carries after the write.
    pub version: i64,
}
