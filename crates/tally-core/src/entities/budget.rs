use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Money;
use crate::enums::CostCategory;
use crate::period::DateRange;

/// Cash and in-kind portions of one cost category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoryAmount {
    pub cash: Money,
    pub in_kind: Money,
}

impl CategoryAmount {
    #[must_use]
    pub const fn total(self) -> Money {
        self.cash + self.in_kind
    }
}

/// One fiscal-year or phase slice of a project's budget.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BudgetPeriod {
    pub id: String,
    pub project_id: String,
    /// 1-based fiscal year / phase index.
    pub period_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub personnel: CategoryAmount,
    pub research_material: CategoryAmount,
    pub research_activity: CategoryAmount,
    pub indirect: CategoryAmount,
    pub spent_amount: Money,
    #[serde(default)]
    pub version: i64,
}

impl BudgetPeriod {
    #[must_use]
    pub const fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    #[must_use]
    pub const fn category(&self, category: CostCategory) -> CategoryAmount {
        match category {
            CostCategory::Personnel => self.personnel,
            CostCategory::ResearchMaterial => self.research_material,
            CostCategory::ResearchActivity => self.research_activity,
            CostCategory::Indirect => self.indirect,
        }
    }

    /// Sum of cash and in-kind over all four categories. Always derived.
    #[must_use]
    pub fn total_budget(&self) -> Money {
        CostCategory::ALL
            .iter()
            .map(|c| self.category(*c).total())
            .sum()
    }

    /// Declared personnel cost (cash + in-kind).
    #[must_use]
    pub const fn personnel_cost(&self) -> Money {
        self.personnel.total()
    }

    /// Split a corrected personnel total into cash and in-kind.
    ///
    /// The in-kind portion is kept unless it exceeds the new total, in which
    /// case it is capped at the total and cash becomes zero. Storage applies
    /// the same rule in SQL.
    #[must_use]
    pub fn split_personnel(&self, total: Money) -> CategoryAmount {
        let in_kind = self.personnel.in_kind.min(total);
        CategoryAmount {
            cash: total - in_kind,
            in_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period() -> BudgetPeriod {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        BudgetPeriod {
            id: "bp-1".into(),
            project_id: "prj-1".into(),
            period_number: 1,
            start_date: d("2024-01-01"),
            end_date: d("2024-12-31"),
            personnel: CategoryAmount { cash: 100, in_kind: 20 },
            research_material: CategoryAmount { cash: 30, in_kind: 0 },
            research_activity: CategoryAmount { cash: 10, in_kind: 5 },
            indirect: CategoryAmount { cash: 7, in_kind: 0 },
            spent_amount: 0,
            version: 0,
        }
    }

    #[test]
    fn total_budget_sums_all_categories() {
        assert_eq!(period().total_budget(), 172);
        assert_eq!(period().personnel_cost(), 120);
    }

    #[test]
    fn split_personnel_keeps_in_kind_when_possible() {
        let p = period();
        assert_eq!(p.split_personnel(150), CategoryAmount { cash: 130, in_kind: 20 });
        assert_eq!(p.split_personnel(15), CategoryAmount { cash: 0, in_kind: 15 });
    }
}
