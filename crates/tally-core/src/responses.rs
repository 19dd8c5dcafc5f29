//! Response envelopes returned as JSON by `tally` commands and the HTTP
//! boundary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Error envelope: `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Response from `tally import`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub projects: u32,
    pub employees: u32,
    pub budgets: u32,
    pub members: u32,
    pub evidence: u32,
    pub duration_ms: u64,
}
