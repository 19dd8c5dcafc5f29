//! Budget consistency: the project's declared total must equal the sum of its
//! periods' category budgets, exactly.

use tally_core::Money;
use tally_core::enums::{EntityType, FixField, ValidatorKind};
use tally_core::report::{
    BudgetConsistencyDetails, Fix, FixValue, ItemSummary, PeriodTotal, ValidationDetails,
    ValidationResult,
};

use crate::snapshot::ProjectSnapshot;
use crate::validator::Validator;

pub struct BudgetConsistencyValidator;

fn expected_total(snapshot: &ProjectSnapshot) -> Money {
    snapshot.periods.iter().map(|p| p.total_budget()).sum()
}

impl Validator for BudgetConsistencyValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::BudgetConsistency
    }

    fn evaluate(&self, snapshot: &ProjectSnapshot) -> ValidationResult {
        let declared = snapshot.project.declared_total_budget;
        let expected = expected_total(snapshot);
        let is_valid = declared == expected;

        let mut summary = ItemSummary::default();
        summary.record(is_valid);

        let message = if is_valid {
            format!(
                "Declared total {declared} matches the sum of {} budget periods",
                snapshot.periods.len()
            )
        } else {
            format!(
                "Declared total {declared} differs from the period sum {expected} by {}",
                declared - expected
            )
        };

        ValidationResult {
            is_valid,
            message,
            summary,
            details: ValidationDetails::BudgetConsistency(BudgetConsistencyDetails {
                declared_total: declared,
                expected_total: expected,
                difference: declared - expected,
                periods: snapshot
                    .periods
                    .iter()
                    .map(|p| PeriodTotal {
                        period_id: p.id.clone(),
                        period_number: p.period_number,
                        total_budget: p.total_budget(),
                    })
                    .collect(),
            }),
        }
    }

    fn plan_fixes(&self, snapshot: &ProjectSnapshot) -> Vec<Fix> {
        let project = &snapshot.project;
        let expected = expected_total(snapshot);
        if project.declared_total_budget == expected {
            return Vec::new();
        }
        vec![Fix {
            validator: ValidatorKind::BudgetConsistency,
            entity_type: EntityType::Project,
            scope: project.id.clone(),
            field: FixField::DeclaredTotalBudget,
            old_value: FixValue::Amount(project.declared_total_budget),
            new_value: FixValue::Amount(expected),
            expected_version: project.version,
        }]
    }
}
