//! Participation rate: an employee's concurrent participation across every
//! active assignment must not exceed the limit (100% by default).
//!
//! The reported total is the peak over any single day, so assignments that
//! follow one another never add up.

use std::collections::BTreeSet;

use tally_core::entities::{Employee, Member};
use tally_core::enums::{EntityType, FixField, ParticipationStatus, ValidatorKind};
use tally_core::period::{DateRange, peak_concurrent};
use tally_core::report::{
    AssignmentRate, EmployeeParticipation, EmployeeSummary, Fix, FixValue, ItemSummary,
    ParticipationDetails, ValidationDetails, ValidationResult,
};

use super::percent;
use crate::snapshot::ProjectSnapshot;
use crate::validator::Validator;

/// Rates are recorded with at most a few decimals; sums within this of the
/// limit count as exactly at the limit.
const EPSILON: f64 = 1e-9;

/// Classify a total rate against the limit.
#[must_use]
pub fn classify(total: f64, limit: f64) -> ParticipationStatus {
    if total > limit + EPSILON {
        ParticipationStatus::OverLimit
    } else if (total - limit).abs() <= EPSILON {
        ParticipationStatus::Full
    } else {
        ParticipationStatus::Available
    }
}

fn assignment(member: &Member) -> AssignmentRate {
    AssignmentRate {
        member_id: member.id.clone(),
        project_id: member.project_id.clone(),
        rate: member.participation_rate,
        range: member.range(),
    }
}

/// Active records, restricted to those overlapping `window` when given.
fn counted<'a>(
    records: impl IntoIterator<Item = &'a Member>,
    window: Option<&DateRange>,
) -> Vec<&'a Member> {
    records
        .into_iter()
        .filter(|m| m.is_active())
        .filter(|m| window.is_none_or(|w| m.range().overlaps(w)))
        .collect()
}

/// Peak concurrent rate of `records`, clipped to `window` when given.
fn total_rate(records: &[&Member], window: Option<&DateRange>) -> f64 {
    peak_concurrent(records.iter().filter_map(|m| {
        let range = match window {
            Some(w) => m.range().intersect(w)?,
            None => m.range(),
        };
        Some((range, m.participation_rate))
    }))
}

/// Summary mode: one employee across every project.
#[must_use]
pub fn summarize(
    employee_id: &str,
    employee: Option<&Employee>,
    records: &[Member],
    window: Option<DateRange>,
    limit: f64,
) -> EmployeeSummary {
    let active = counted(records, window.as_ref());
    let total = total_rate(&active, window.as_ref());
    EmployeeSummary {
        employee_id: employee_id.to_string(),
        employee_name: employee.map(|e| e.name.clone()),
        window,
        limit,
        total_rate: total,
        remaining_capacity: (limit - total).max(0.0),
        status: classify(total, limit),
        assignments: active.into_iter().map(assignment).collect(),
    }
}

pub struct ParticipationRateValidator {
    limit: f64,
}

impl ParticipationRateValidator {
    #[must_use]
    pub const fn new(limit: f64) -> Self {
        Self { limit }
    }

    /// Peak totals for every employee with an active record on this project,
    /// within the project's date range.
    fn participation(&self, snapshot: &ProjectSnapshot) -> Vec<EmployeeParticipation> {
        let window = snapshot.project.range();
        let employee_ids: BTreeSet<&str> = snapshot
            .members
            .iter()
            .filter(|m| m.is_active())
            .map(|m| m.employee_id.as_str())
            .collect();

        employee_ids
            .into_iter()
            .map(|employee_id| {
                let records = counted(snapshot.assignments_of(employee_id), Some(&window));
                let total = total_rate(&records, Some(&window));
                EmployeeParticipation {
                    employee_id: employee_id.to_string(),
                    employee_name: snapshot.employees.get(employee_id).map(|e| e.name.clone()),
                    total_rate: total,
                    status: classify(total, self.limit),
                    assignments: records.into_iter().map(assignment).collect(),
                }
            })
            .collect()
    }
}

impl Validator for ParticipationRateValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::ParticipationRate
    }

    fn evaluate(&self, snapshot: &ProjectSnapshot) -> ValidationResult {
        let employees = self.participation(snapshot);
        let over: Vec<&EmployeeParticipation> = employees
            .iter()
            .filter(|e| e.status == ParticipationStatus::OverLimit)
            .collect();

        let mut summary = ItemSummary::default();
        for member in snapshot.members.iter().filter(|m| m.is_active()) {
            summary.record(!over.iter().any(|e| e.employee_id == member.employee_id));
        }

        let message = if over.is_empty() {
            format!(
                "All {} employees are within {}% participation",
                employees.len(),
                percent(self.limit)
            )
        } else {
            let names: Vec<String> = over
                .iter()
                .map(|e| match &e.employee_name {
                    Some(name) => format!("{} ({name}) at {}%", e.employee_id, percent(e.total_rate)),
                    None => format!("{} at {}%", e.employee_id, percent(e.total_rate)),
                })
                .collect();
            format!(
                "Participation exceeds {}%: {}",
                percent(self.limit),
                names.join(", ")
            )
        };

        ValidationResult {
            is_valid: over.is_empty(),
            message,
            summary,
            details: ValidationDetails::ParticipationRate(ParticipationDetails {
                limit: self.limit,
                window: Some(snapshot.project.range()),
                employees,
            }),
        }
    }

    /// Clamp this project's single records that exceed the limit on their
    /// own. Overage spread across several records is left as reported.
    fn plan_fixes(&self, snapshot: &ProjectSnapshot) -> Vec<Fix> {
        let window = snapshot.project.range();
        let over: BTreeSet<String> = self
            .participation(snapshot)
            .into_iter()
            .filter(|e| e.status == ParticipationStatus::OverLimit)
            .map(|e| e.employee_id)
            .collect();

        counted(&snapshot.members, Some(&window))
            .into_iter()
            .filter(|m| over.contains(&m.employee_id))
            .filter(|m| m.participation_rate > self.limit + EPSILON)
            .map(|m| Fix {
                validator: ValidatorKind::ParticipationRate,
                entity_type: EntityType::Member,
                scope: m.id.clone(),
                field: FixField::ParticipationRate,
                old_value: FixValue::Rate(m.participation_rate),
                new_value: FixValue::Rate(self.limit),
                expected_version: m.version,
            })
            .collect()
    }
}
