use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Money;
use crate::enums::ProjectStatus;
use crate::period::DateRange;

/// A funded research/administrative project.
///
/// `version` is the optimistic-concurrency token checked by corrective writes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub declared_total_budget: Money,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub version: i64,
}

impl Project {
    #[must_use]
    pub const fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}
