//! Personnel cost: a period's declared personnel cost must match the cost
//! implied by the participation records overlapping it, within an absolute
//! tolerance.

use tally_core::Money;
use tally_core::entities::{BudgetPeriod, Member};
use tally_core::enums::{EntityType, FixField, ValidatorKind};
use tally_core::period::overlap_months;
use tally_core::report::{
    Fix, FixValue, ItemSummary, PeriodPersonnelCost, PersonnelContribution, PersonnelCostDetails,
    ValidationDetails, ValidationResult,
};

use crate::snapshot::ProjectSnapshot;
use crate::validator::Validator;

/// `monthly_amount × months × rate / 100`, rounded to the minor unit.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn record_cost(monthly_amount: Money, months: u32, rate: f64) -> Money {
    (monthly_amount as f64 * f64::from(months) * rate / 100.0).round() as Money
}

pub struct PersonnelCostValidator {
    tolerance: Money,
}

impl PersonnelCostValidator {
    #[must_use]
    pub const fn new(tolerance: Money) -> Self {
        Self { tolerance }
    }

    fn reconcile(&self, period: &BudgetPeriod, members: &[Member]) -> PeriodPersonnelCost {
        let range = period.range();
        let contributions: Vec<PersonnelContribution> = members
            .iter()
            .filter_map(|m| {
                let months = overlap_months(&m.range(), &range);
                (months > 0).then(|| PersonnelContribution {
                    member_id: m.id.clone(),
                    employee_id: m.employee_id.clone(),
                    overlap_months: months,
                    participation_rate: m.participation_rate,
                    monthly_amount: m.monthly_amount,
                    cost: record_cost(m.monthly_amount, months, m.participation_rate),
                })
            })
            .collect();

        let declared = period.personnel_cost();
        let actual: Money = contributions.iter().map(|c| c.cost).sum();
        let difference = declared - actual;
        PeriodPersonnelCost {
            period_id: period.id.clone(),
            period_number: period.period_number,
            declared,
            actual,
            difference,
            is_valid: difference.abs() <= self.tolerance,
            contributions,
        }
    }

    fn reconcile_all(&self, snapshot: &ProjectSnapshot) -> Vec<PeriodPersonnelCost> {
        snapshot
            .periods
            .iter()
            .map(|p| self.reconcile(p, &snapshot.members))
            .collect()
    }
}

impl Validator for PersonnelCostValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::PersonnelCost
    }

    fn evaluate(&self, snapshot: &ProjectSnapshot) -> ValidationResult {
        let periods = self.reconcile_all(snapshot);
        let mut summary = ItemSummary::default();
        for period in &periods {
            summary.record(period.is_valid);
        }

        let mismatched: Vec<String> = periods
            .iter()
            .filter(|p| !p.is_valid)
            .map(|p| {
                format!(
                    "period {} declared {} but participation implies {} (difference {})",
                    p.period_number, p.declared, p.actual, p.difference
                )
            })
            .collect();
        let message = if periods.is_empty() {
            "No budget periods to reconcile".to_string()
        } else if mismatched.is_empty() {
            format!(
                "Personnel cost matches participation in all {} periods (tolerance {})",
                periods.len(),
                self.tolerance
            )
        } else {
            format!(
                "Personnel cost mismatch in {} of {} periods: {}",
                mismatched.len(),
                periods.len(),
                mismatched.join("; ")
            )
        };

        ValidationResult {
            is_valid: mismatched.is_empty(),
            message,
            summary,
            details: ValidationDetails::PersonnelCost(PersonnelCostDetails {
                tolerance: self.tolerance,
                periods,
            }),
        }
    }

    fn plan_fixes(&self, snapshot: &ProjectSnapshot) -> Vec<Fix> {
        snapshot
            .periods
            .iter()
            .map(|period| (period, self.reconcile(period, &snapshot.members)))
            .filter(|(_, cost)| !cost.is_valid)
            .map(|(period, cost)| Fix {
                validator: ValidatorKind::PersonnelCost,
                entity_type: EntityType::BudgetPeriod,
                scope: period.id.clone(),
                field: FixField::PersonnelCost,
                old_value: FixValue::Amount(cost.declared),
                new_value: FixValue::Amount(cost.actual),
                expected_version: period.version,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tally_core::entities::CategoryAmount;

    use crate::test_support::fixtures::{build, date, member, period, project};

    /// One 2024 period declaring `declared`; one member at 50% of 1,000,000
    /// a month for the whole year (actual 6,000,000).
    fn snapshot(declared: Money) -> ProjectSnapshot {
        let mut bp = period("bp-1", 1, "2024-01-01", "2024-12-31");
        bp.personnel = CategoryAmount {
            cash: declared - 500_000,
            in_kind: 500_000,
        };
        let mut m = member("mem-1", "emp-1", 50.0);
        m.monthly_amount = 1_000_000;
        build(project("prj-1"), vec![bp], vec![m], vec![], vec![])
    }

    #[rstest]
    #[case::exact(6_000_000, true)]
    #[case::at_tolerance_over(6_001_000, true)]
    #[case::at_tolerance_under(5_999_000, true)]
    #[case::past_tolerance_over(6_001_001, false)]
    #[case::past_tolerance_under(5_998_999, false)]
    fn tolerance_is_inclusive(#[case] declared: Money, #[case] valid: bool) {
        let result = PersonnelCostValidator::new(1_000).evaluate(&snapshot(declared));
        assert_eq!(result.is_valid, valid);
    }

    #[rstest]
    #[case::same_month("2024-03-10", "2024-03-20", 1)]
    #[case::straddles_month_end("2024-03-31", "2024-04-01", 2)]
    #[case::starts_before_period("2023-07-01", "2024-02-15", 2)]
    #[case::ends_after_period("2024-11-01", "2025-06-30", 2)]
    #[case::disjoint("2025-01-01", "2025-12-31", 0)]
    fn overlap_months_use_intersection(
        #[case] start: &str,
        #[case] end: &str,
        #[case] months: u32,
    ) {
        let mut snapshot = snapshot(0);
        snapshot.members[0].start_date = date(start);
        snapshot.members[0].end_date = date(end);

        let result = PersonnelCostValidator::new(0).evaluate(&snapshot);
        let ValidationDetails::PersonnelCost(details) = &result.details else {
            panic!("wrong details");
        };
        let counted: u32 = details.periods[0]
            .contributions
            .iter()
            .map(|c| c.overlap_months)
            .sum();
        assert_eq!(counted, months);
        assert_eq!(
            details.periods[0].actual,
            record_cost(1_000_000, months, 50.0)
        );
    }

    #[test]
    fn costs_round_per_record() {
        assert_eq!(record_cost(333_333, 1, 33.3), 111_000);
        assert_eq!(record_cost(1_001, 3, 50.0), 1_502);
    }

    #[test]
    fn fix_overwrites_with_actual() {
        let snapshot = snapshot(7_000_000);
        let fixes = PersonnelCostValidator::new(1_000).plan_fixes(&snapshot);
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].scope, "bp-1");
        assert_eq!(fixes[0].old_value, FixValue::Amount(7_000_000));
        assert_eq!(fixes[0].new_value, FixValue::Amount(6_000_000));

        let projected = snapshot.with_fixes(&fixes);
        assert!(PersonnelCostValidator::new(1_000).evaluate(&projected).is_valid);
        assert_eq!(projected.periods[0].personnel.in_kind, 500_000);
    }

    #[test]
    fn no_periods_is_valid() {
        let snapshot = build(project("prj-1"), vec![], vec![], vec![], vec![]);
        let result = PersonnelCostValidator::new(1_000).evaluate(&snapshot);
        assert!(result.is_valid);
        assert_eq!(result.summary.total_items, 0);
    }
}
