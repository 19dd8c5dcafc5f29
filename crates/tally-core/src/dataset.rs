//! Bulk dataset envelope used by `tally import`.
//!
//! The CRUD layer is outside Tally; a dataset is the JSON stand-in that seeds
//! storage for local runs and tests.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{BudgetPeriod, Employee, EvidenceItem, Member, Project};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub budgets: Vec<BudgetPeriod>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
}

impl Dataset {
    /// Total number of records across all tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
            + self.employees.len()
            + self.budgets.len()
            + self.members.len()
            + self.evidence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
