use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EmployeeStatus;
use crate::period::EmploymentWindow;

/// A person who may be assigned to projects.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub hire_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
}

impl Employee {
    /// `[hire_date, termination_date ?? +inf)`.
    #[must_use]
    pub const fn window(&self) -> EmploymentWindow {
        EmploymentWindow {
            start: self.hire_date,
            end: self.termination_date,
        }
    }
}
