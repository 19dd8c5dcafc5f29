//! Point-in-time project snapshots.
//!
//! A [`ProjectSnapshot`] is everything the validators may look at for one
//! project, loaded once per run. It is never mutated in place: auto-fix
//! planning produces a new snapshot through [`ProjectSnapshot::with_fixes`].

use std::collections::{BTreeMap, BTreeSet};

use tally_core::entities::{BudgetPeriod, Employee, EvidenceItem, Member, Project};
use tally_core::enums::{CostCategory, FixField};
use tally_core::report::{Fix, FixValue};
use tally_core::store::{SnapshotLoader, StoreError};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSnapshot {
    pub project: Project,
    /// Budget periods ordered by period number.
    pub periods: Vec<BudgetPeriod>,
    /// This project's participation records.
    pub members: Vec<Member>,
    /// Employees referenced by members or personnel evidence. Dangling
    /// references are simply absent.
    pub employees: BTreeMap<String, Employee>,
    /// Every participation record of each member's employee, across all
    /// projects. Keyed by employee id.
    pub employee_assignments: BTreeMap<String, Vec<Member>>,
    pub evidence: Vec<EvidenceItem>,
}

/// Load one project's snapshot.
///
/// # Errors
///
/// Propagates the first collaborator failure.
pub async fn load_snapshot<L: SnapshotLoader>(
    loader: &L,
    project_id: &str,
) -> Result<ProjectSnapshot, StoreError> {
    let project = loader.get_project(project_id).await?;
    let mut periods = loader.get_project_budgets(project_id).await?;
    periods.sort_by_key(|p| p.period_number);
    let members = loader.get_project_members(project_id).await?;
    let evidence = loader.get_evidence_items(project_id, None).await?;

    let member_employees: BTreeSet<&str> =
        members.iter().map(|m| m.employee_id.as_str()).collect();
    let assignees = evidence
        .iter()
        .filter(|e| e.category == CostCategory::Personnel)
        .filter_map(|e| e.assignee_id.as_deref());
    let referenced: BTreeSet<&str> = member_employees.iter().copied().chain(assignees).collect();

    let mut employees = BTreeMap::new();
    for id in referenced {
        if let Some(employee) = loader.get_employee(id).await? {
            employees.insert(id.to_string(), employee);
        }
    }

    let mut employee_assignments = BTreeMap::new();
    for id in member_employees {
        let records = loader.get_employee_members(id).await?;
        employee_assignments.insert(id.to_string(), records);
    }

    Ok(ProjectSnapshot {
        project,
        periods,
        members,
        employees,
        employee_assignments,
        evidence,
    })
}

impl ProjectSnapshot {
    /// Reject snapshots whose shape makes the validators meaningless.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` naming the first malformed record.
    pub fn check_bounds(&self) -> Result<(), EngineError> {
        let project = &self.project;
        if !project.range().is_well_formed() {
            return Err(EngineError::InvalidInput(format!(
                "project {} starts {} after it ends {}",
                project.id, project.start_date, project.end_date
            )));
        }
        for period in &self.periods {
            if period.period_number == 0 {
                return Err(EngineError::InvalidInput(format!(
                    "budget period {} has period number 0",
                    period.id
                )));
            }
            if !period.range().is_well_formed() {
                return Err(EngineError::InvalidInput(format!(
                    "budget period {} starts {} after it ends {}",
                    period.id, period.start_date, period.end_date
                )));
            }
        }
        for member in &self.members {
            if !member.range().is_well_formed() {
                return Err(EngineError::InvalidInput(format!(
                    "participation record {} starts {} after it ends {}",
                    member.id, member.start_date, member.end_date
                )));
            }
            if !member.participation_rate.is_finite() || member.participation_rate < 0.0 {
                return Err(EngineError::InvalidInput(format!(
                    "participation record {} has invalid rate {}",
                    member.id, member.participation_rate
                )));
            }
        }
        Ok(())
    }

    /// Every record of one employee the participation check sums over.
    ///
    /// Falls back to this project's own records when no cross-project list
    /// was loaded for the employee.
    #[must_use]
    pub fn assignments_of(&self, employee_id: &str) -> Vec<&Member> {
        match self.employee_assignments.get(employee_id) {
            Some(records) => records.iter().collect(),
            None => self
                .members
                .iter()
                .filter(|m| m.employee_id == employee_id)
                .collect(),
        }
    }

    /// Evidence items recorded against one period.
    pub fn evidence_for<'a>(&'a self, period_id: &'a str) -> impl Iterator<Item = &'a EvidenceItem> {
        self.evidence.iter().filter(move |e| e.period_id == period_id)
    }

    /// The snapshot as it will read after `fixes` commit.
    ///
    /// Each applied fix bumps the target's version, matching what storage
    /// does, so fixes planned against the projection carry the right
    /// expected version.
    #[must_use]
    pub fn with_fixes(&self, fixes: &[Fix]) -> Self {
        let mut next = self.clone();
        for fix in fixes {
            match (fix.field, fix.new_value) {
                (FixField::ParticipationRate, FixValue::Rate(rate)) => {
                    let records = next
                        .members
                        .iter_mut()
                        .chain(next.employee_assignments.values_mut().flatten());
                    for member in records.filter(|m| m.id == fix.scope) {
                        member.participation_rate = rate;
                        member.version += 1;
                    }
                }
                (FixField::PersonnelCost, FixValue::Amount(amount)) => {
                    for period in next.periods.iter_mut().filter(|p| p.id == fix.scope) {
                        period.personnel = period.split_personnel(amount);
                        period.version += 1;
                    }
                }
                (FixField::DeclaredTotalBudget, FixValue::Amount(amount)) => {
                    if next.project.id == fix.scope {
                        next.project.declared_total_budget = amount;
                        next.project.version += 1;
                    }
                }
                _ => tracing::warn!(field = %fix.field, scope = %fix.scope, "fix value does not fit field"),
            }
        }
        next
    }
}
