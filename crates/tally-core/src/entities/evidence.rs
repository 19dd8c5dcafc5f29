use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Money;
use crate::enums::CostCategory;

/// A recorded unit of actual spend or documentation against one budget
/// period and category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvidenceItem {
    pub id: String,
    pub period_id: String,
    pub title: String,
    pub category: CostCategory,
    pub assignee_id: Option<String>,
    pub spent_amount: Money,
    pub due_date: NaiveDate,
}
