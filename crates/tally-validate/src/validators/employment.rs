//! Employment period: every participation record and every personnel evidence
//! item must fall inside its employee's `[hire_date, termination_date]`
//! window. Flag-only; there is no auto-fix.

use tally_core::entities::Employee;
use tally_core::enums::{CostCategory, EmployeeStatus, ValidatorKind};
use tally_core::period::DateRange;
use tally_core::report::{
    EmploymentDetails, EmploymentSubject, EmploymentViolation, EmploymentViolationKind,
    ItemSummary, ValidationDetails, ValidationResult,
};

use crate::snapshot::ProjectSnapshot;
use crate::validator::Validator;

pub struct EmploymentPeriodValidator;

/// Check one activity against its (possibly missing) employee.
fn check(employee: Option<&Employee>, activity: &DateRange) -> Result<(), EmploymentViolationKind> {
    let Some(employee) = employee else {
        return Err(EmploymentViolationKind::UnknownEmployee);
    };
    if employee.status == EmployeeStatus::Terminated && employee.termination_date.is_none() {
        return Err(EmploymentViolationKind::EmployeeInactive);
    }
    employee.window().check(activity).map_err(Into::into)
}

fn subject_id(subject: &EmploymentSubject) -> &str {
    match subject {
        EmploymentSubject::Member { member_id } => member_id,
        EmploymentSubject::EvidenceItem { evidence_id } => evidence_id,
    }
}

impl Validator for EmploymentPeriodValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::EmploymentPeriod
    }

    fn evaluate(&self, snapshot: &ProjectSnapshot) -> ValidationResult {
        let mut summary = ItemSummary::default();
        let mut details = EmploymentDetails {
            checked_members: 0,
            checked_evidence_items: 0,
            skipped_evidence_items: 0,
            violations: Vec::new(),
        };

        let mut inspect = |subject: EmploymentSubject, employee_id: &str, activity: DateRange| {
            let employee = snapshot.employees.get(employee_id);
            let outcome = check(employee, &activity);
            summary.record(outcome.is_ok());
            if let Err(reason) = outcome {
                details.violations.push(EmploymentViolation {
                    subject,
                    employee_id: employee_id.to_string(),
                    activity,
                    hire_date: employee.map(|e| e.hire_date),
                    termination_date: employee.and_then(|e| e.termination_date),
                    reason,
                });
            }
        };

        let mut checked_members = 0;
        for member in &snapshot.members {
            checked_members += 1;
            inspect(
                EmploymentSubject::Member {
                    member_id: member.id.clone(),
                },
                &member.employee_id,
                member.range(),
            );
        }

        let mut checked_evidence = 0;
        let mut skipped_evidence = 0;
        for item in snapshot
            .evidence
            .iter()
            .filter(|e| e.category == CostCategory::Personnel)
        {
            let Some(assignee) = item.assignee_id.as_deref() else {
                skipped_evidence += 1;
                continue;
            };
            checked_evidence += 1;
            inspect(
                EmploymentSubject::EvidenceItem {
                    evidence_id: item.id.clone(),
                },
                assignee,
                DateRange::day(item.due_date),
            );
        }

        details.checked_members = checked_members;
        details.checked_evidence_items = checked_evidence;
        details.skipped_evidence_items = skipped_evidence;

        let message = if details.violations.is_empty() {
            format!(
                "All {} activities fall within employment windows",
                summary.total_items
            )
        } else {
            let listed: Vec<String> = details
                .violations
                .iter()
                .map(|v| {
                    format!(
                        "{} ({}) {}",
                        subject_id(&v.subject),
                        v.employee_id,
                        v.reason.describe()
                    )
                })
                .collect();
            format!(
                "{} employment period violation(s): {}",
                details.violations.len(),
                listed.join("; ")
            )
        };

        ValidationResult {
            is_valid: details.violations.is_empty(),
            message,
            summary,
            details: ValidationDetails::EmploymentPeriod(details),
        }
    }
}
