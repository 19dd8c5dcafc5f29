//! JSONL fix trail.
//!
//! Committed corrections are appended per project to
//! `{trail_dir}/{project_id}.jsonl`.

pub mod writer;
