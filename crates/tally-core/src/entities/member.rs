use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Money;
use crate::enums::MemberStatus;
use crate::period::DateRange;

/// A participation record: one employee assigned to one project for a period
/// at a percentage of their capacity.
///
/// `participation_rate` is expected in `0..=100` but may hold larger values
/// through data-entry errors; the participation validator exists to catch them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Member {
    pub id: String,
    pub project_id: String,
    pub employee_id: String,
    pub role: String,
    pub participation_rate: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_amount: Money,
    pub status: MemberStatus,
    #[serde(default)]
    pub version: i64,
}

impl Member {
    #[must_use]
    pub const fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}
