//! Validation results, reports, and fix records.
//!
//! These are the engine's outputs. They are never persisted; they serialize to
//! the camelCase JSON shape the HTTP boundary returns.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Money;
use crate::enums::{
    CostCategory, EntityType, FixField, ParticipationStatus, ValidatorKind,
};
use crate::period::{DateRange, WindowBreach};

// ---------------------------------------------------------------------------
// Summary counts
// ---------------------------------------------------------------------------

/// Pass/fail tally over fine-grained sub-checks (one per record, period, ...).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub total_items: u32,
    pub valid_items: u32,
    pub invalid_items: u32,
}

impl ItemSummary {
    /// Record one sub-check outcome.
    pub const fn record(&mut self, valid: bool) {
        self.total_items += 1;
        if valid {
            self.valid_items += 1;
        } else {
            self.invalid_items += 1;
        }
    }

    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            total_items: self.total_items + other.total_items,
            valid_items: self.valid_items + other.valid_items,
            invalid_items: self.invalid_items + other.invalid_items,
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Output of one validator (or the merge of several).
///
/// A consistency violation is `is_valid == false`, never an error.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
    pub summary: ItemSummary,
    pub details: ValidationDetails,
}

impl ValidationResult {
    /// The validator that produced this result, `None` for a combined result.
    #[must_use]
    pub const fn kind(&self) -> Option<ValidatorKind> {
        match &self.details {
            ValidationDetails::ParticipationRate(_) => Some(ValidatorKind::ParticipationRate),
            ValidationDetails::EmploymentPeriod(_) => Some(ValidatorKind::EmploymentPeriod),
            ValidationDetails::PersonnelCost(_) => Some(ValidatorKind::PersonnelCost),
            ValidationDetails::BudgetConsistency(_) => Some(ValidatorKind::BudgetConsistency),
            ValidationDetails::UsageRate(_) => Some(ValidatorKind::UsageRate),
            ValidationDetails::Combined { .. } => None,
        }
    }

    /// Merge several results into one. A single result is returned unchanged.
    #[must_use]
    pub fn combine(mut results: Vec<Self>) -> Self {
        if results.len() == 1 {
            if let Some(only) = results.pop() {
                return only;
            }
        }

        let is_valid = results.iter().all(|r| r.is_valid);
        let summary = results
            .iter()
            .fold(ItemSummary::default(), |acc, r| acc.merge(r.summary));
        let failures: Vec<String> = results
            .iter()
            .filter(|r| !r.is_valid)
            .map(|r| match r.kind() {
                Some(kind) => format!("[{kind}] {}", r.message),
                None => r.message.clone(),
            })
            .collect();
        let message = if failures.is_empty() {
            format!("All {} checks passed", results.len())
        } else {
            failures.join("; ")
        };

        Self {
            is_valid,
            message,
            summary,
            details: ValidationDetails::Combined { results },
        }
    }
}

/// Validator-specific structured payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationDetails {
    ParticipationRate(ParticipationDetails),
    EmploymentPeriod(EmploymentDetails),
    PersonnelCost(PersonnelCostDetails),
    BudgetConsistency(BudgetConsistencyDetails),
    UsageRate(UsageRateDetails),
    Combined { results: Vec<ValidationResult> },
}

// ---------------------------------------------------------------------------
// Participation rate
// ---------------------------------------------------------------------------

/// One participation record's contribution to an employee's total.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRate {
    pub member_id: String,
    pub project_id: String,
    pub rate: f64,
    pub range: DateRange,
}

/// Total concurrent participation of one employee.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeParticipation {
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub total_rate: f64,
    pub status: ParticipationStatus,
    pub assignments: Vec<AssignmentRate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationDetails {
    pub limit: f64,
    pub window: Option<DateRange>,
    pub employees: Vec<EmployeeParticipation>,
}

/// Summary-mode answer for one employee across every project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub window: Option<DateRange>,
    pub limit: f64,
    pub total_rate: f64,
    pub remaining_capacity: f64,
    pub status: ParticipationStatus,
    pub assignments: Vec<AssignmentRate>,
}

// ---------------------------------------------------------------------------
// Employment period
// ---------------------------------------------------------------------------

/// What was checked against an employment window.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmploymentSubject {
    Member { member_id: String },
    EvidenceItem { evidence_id: String },
}

/// Why an activity fell outside its employee's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentViolationKind {
    BeforeHire,
    AfterTermination,
    EmployeeInactive,
    UnknownEmployee,
}

impl EmploymentViolationKind {
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::BeforeHire => "starts before hire date",
            Self::AfterTermination => "ends after termination date",
            Self::EmployeeInactive => "employee is terminated without a termination date",
            Self::UnknownEmployee => "employee record not found",
        }
    }
}

impl From<WindowBreach> for EmploymentViolationKind {
    fn from(breach: WindowBreach) -> Self {
        match breach {
            WindowBreach::BeforeStart => Self::BeforeHire,
            WindowBreach::AfterEnd => Self::AfterTermination,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentViolation {
    pub subject: EmploymentSubject,
    pub employee_id: String,
    pub activity: DateRange,
    pub hire_date: Option<chrono::NaiveDate>,
    pub termination_date: Option<chrono::NaiveDate>,
    pub reason: EmploymentViolationKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentDetails {
    pub checked_members: u32,
    pub checked_evidence_items: u32,
    pub skipped_evidence_items: u32,
    pub violations: Vec<EmploymentViolation>,
}

// ---------------------------------------------------------------------------
// Personnel cost
// ---------------------------------------------------------------------------

/// Cost implied by one participation record inside one period.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelContribution {
    pub member_id: String,
    pub employee_id: String,
    pub overlap_months: u32,
    pub participation_rate: f64,
    pub monthly_amount: Money,
    pub cost: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodPersonnelCost {
    pub period_id: String,
    pub period_number: u32,
    pub declared: Money,
    pub actual: Money,
    pub difference: Money,
    pub is_valid: bool,
    pub contributions: Vec<PersonnelContribution>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelCostDetails {
    pub tolerance: Money,
    pub periods: Vec<PeriodPersonnelCost>,
}

// ---------------------------------------------------------------------------
// Budget consistency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotal {
    pub period_id: String,
    pub period_number: u32,
    pub total_budget: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConsistencyDetails {
    pub declared_total: Money,
    pub expected_total: Money,
    pub difference: Money,
    pub periods: Vec<PeriodTotal>,
}

// ---------------------------------------------------------------------------
// Usage rate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUsage {
    pub budget: Money,
    pub spent: Money,
    pub usage_rate: f64,
}

/// Per-category breakdown in the wire names the reports use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CategoryBreakdown {
    pub personnel: CategoryUsage,
    pub material: CategoryUsage,
    pub activity: CategoryUsage,
    pub indirect: CategoryUsage,
}

impl CategoryBreakdown {
    #[must_use]
    pub const fn get(&self, category: CostCategory) -> CategoryUsage {
        match category {
            CostCategory::Personnel => self.personnel,
            CostCategory::ResearchMaterial => self.material,
            CostCategory::ResearchActivity => self.activity,
            CostCategory::Indirect => self.indirect,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodUsage {
    pub period_id: String,
    pub period_number: u32,
    pub total_budget: Money,
    pub spent_amount: Money,
    pub overall_usage_rate: f64,
    pub categories: CategoryBreakdown,
    pub is_valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageRateDetails {
    pub max_usage_rate: f64,
    pub periods: Vec<PeriodUsage>,
}

// ---------------------------------------------------------------------------
// Fixes
// ---------------------------------------------------------------------------

/// Old or new value of a corrected field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum FixValue {
    Amount(Money),
    Rate(f64),
}

/// One corrective write, planned by a validator and applied by the
/// orchestrator inside the project's transaction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    pub validator: ValidatorKind,
    pub entity_type: EntityType,
    /// Id of the entity the write is scoped to.
    pub scope: String,
    pub field: FixField,
    pub old_value: FixValue,
    pub new_value: FixValue,
    /// Version the entity had when the snapshot was loaded.
    pub expected_version: i64,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Result of running one or more validators against one project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub project_id: String,
    pub project_title: String,
    /// A validator name, `all`, or a comma-separated selection.
    pub validation_type: String,
    pub auto_fix: bool,
    pub validation: ValidationResult,
    pub summary: ItemSummary,
    /// Committed fixes. Empty unless auto-fix ran and a write committed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<Fix>,
    /// Set when the fix transaction rolled back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_error: Option<String>,
}

/// One project's line in a bulk run: either a report or an error.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkProjectEntry {
    pub project_id: String,
    pub project_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidationReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BulkSummary {
    pub total_projects: u32,
    pub projects_with_fixes: u32,
    pub total_issues: u32,
    pub total_fixed_issues: u32,
    pub failed_projects: u32,
}

/// Fleet-wide result over every active project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkReport {
    pub validation_type: String,
    pub auto_fix: bool,
    pub summary: BulkSummary,
    pub projects: Vec<BulkProjectEntry>,
}
