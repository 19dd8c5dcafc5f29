//! Usage rate: spend against budget per period and per cost category.
//! Observation only; there is no auto-fix.

use tally_core::Money;
use tally_core::entities::BudgetPeriod;
use tally_core::enums::{CostCategory, ValidatorKind};
use tally_core::report::{
    CategoryBreakdown, CategoryUsage, ItemSummary, PeriodUsage, UsageRateDetails,
    ValidationDetails, ValidationResult,
};

use super::percent;
use crate::snapshot::ProjectSnapshot;
use crate::validator::Validator;

/// `spent / budget`, or 0 when the budget is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn usage_ratio(spent: Money, budget: Money) -> f64 {
    if budget == 0 {
        0.0
    } else {
        spent as f64 / budget as f64
    }
}

pub struct UsageRateValidator {
    max_usage_rate: f64,
}

impl UsageRateValidator {
    #[must_use]
    pub const fn new(max_usage_rate: f64) -> Self {
        Self { max_usage_rate }
    }

    fn usage(&self, snapshot: &ProjectSnapshot, period: &BudgetPeriod) -> PeriodUsage {
        let category = |c: CostCategory| {
            let budget = period.category(c).total();
            let spent: Money = snapshot
                .evidence_for(&period.id)
                .filter(|e| e.category == c)
                .map(|e| e.spent_amount)
                .sum();
            CategoryUsage {
                budget,
                spent,
                usage_rate: usage_ratio(spent, budget),
            }
        };
        let categories = CategoryBreakdown {
            personnel: category(CostCategory::Personnel),
            material: category(CostCategory::ResearchMaterial),
            activity: category(CostCategory::ResearchActivity),
            indirect: category(CostCategory::Indirect),
        };

        let total_budget = period.total_budget();
        let overall = usage_ratio(period.spent_amount, total_budget);
        let within = overall <= self.max_usage_rate
            && CostCategory::ALL
                .iter()
                .all(|c| categories.get(*c).usage_rate <= self.max_usage_rate);

        PeriodUsage {
            period_id: period.id.clone(),
            period_number: period.period_number,
            total_budget,
            spent_amount: period.spent_amount,
            overall_usage_rate: overall,
            categories,
            is_valid: within,
        }
    }
}

impl Validator for UsageRateValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::UsageRate
    }

    fn evaluate(&self, snapshot: &ProjectSnapshot) -> ValidationResult {
        let periods: Vec<PeriodUsage> = snapshot
            .periods
            .iter()
            .map(|p| self.usage(snapshot, p))
            .collect();

        let mut summary = ItemSummary::default();
        for period in &periods {
            summary.record(period.is_valid);
        }

        let ceiling = percent(self.max_usage_rate * 100.0);
        let over: Vec<String> = periods
            .iter()
            .filter(|p| !p.is_valid)
            .map(|p| {
                format!(
                    "period {} at {}% overall",
                    p.period_number,
                    percent(p.overall_usage_rate * 100.0)
                )
            })
            .collect();
        let message = if over.is_empty() {
            format!("Usage within {ceiling}% in all {} periods", periods.len())
        } else {
            format!("Usage above {ceiling}%: {}", over.join(", "))
        };

        ValidationResult {
            is_valid: over.is_empty(),
            message,
            summary,
            details: ValidationDetails::UsageRate(UsageRateDetails {
                max_usage_rate: self.max_usage_rate,
                periods,
            }),
        }
    }
}
