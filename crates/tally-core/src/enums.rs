//! Status enums, cost categories, validator kinds, and fix targets for Tally.
//!
//! Storage-facing enums use `snake_case` serialization via
//! `#[serde(rename_all = "snake_case")]` and expose `as_str()` for SQL columns.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a project. Bulk validation only visits `Active` projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planned,
    Active,
    Suspended,
    Completed,
}

impl ProjectStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EmployeeStatus
// ---------------------------------------------------------------------------

/// Employment status of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Terminated,
}

impl EmployeeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MemberStatus
// ---------------------------------------------------------------------------

/// Status of a participation record. Only `Active` records count toward the
/// concurrent participation rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CostCategory
// ---------------------------------------------------------------------------

/// The four budget cost categories every period carries cash and in-kind
/// amounts for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Personnel,
    ResearchMaterial,
    ResearchActivity,
    Indirect,
}

impl CostCategory {
    /// All categories in reporting order.
    pub const ALL: [Self; 4] = [
        Self::Personnel,
        Self::ResearchMaterial,
        Self::ResearchActivity,
        Self::Indirect,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personnel => "personnel",
            Self::ResearchMaterial => "research_material",
            Self::ResearchActivity => "research_activity",
            Self::Indirect => "indirect",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ParticipationStatus
// ---------------------------------------------------------------------------

/// Classification of an employee's total concurrent participation rate.
///
/// ```text
/// total <  limit → AVAILABLE
/// total == limit → FULL
/// total >  limit → OVER_LIMIT
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStatus {
    Available,
    Full,
    OverLimit,
}

impl ParticipationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Full => "FULL",
            Self::OverLimit => "OVER_LIMIT",
        }
    }
}

impl fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValidatorKind
// ---------------------------------------------------------------------------

/// Identifies one validator. The declaration order is the order in which a
/// combined run evaluates them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    ParticipationRate,
    EmploymentPeriod,
    PersonnelCost,
    BudgetConsistency,
    UsageRate,
}

impl ValidatorKind {
    /// All validators in evaluation order.
    pub const ALL: [Self; 5] = [
        Self::ParticipationRate,
        Self::EmploymentPeriod,
        Self::PersonnelCost,
        Self::BudgetConsistency,
        Self::UsageRate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParticipationRate => "participation_rate",
            Self::EmploymentPeriod => "employment_period",
            Self::PersonnelCost => "personnel_cost",
            Self::BudgetConsistency => "budget_consistency",
            Self::UsageRate => "usage_rate",
        }
    }

    /// Parse a validator name. Accepts `snake_case` and `kebab-case`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().replace('-', "_");
        Self::ALL.into_iter().find(|k| k.as_str() == normalized)
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Entity types the engine reads (and, for three of them, corrects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Project,
    BudgetPeriod,
    Member,
    Employee,
    EvidenceItem,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::BudgetPeriod => "budget_period",
            Self::Member => "member",
            Self::Employee => "employee",
            Self::EvidenceItem => "evidence_item",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FixField
// ---------------------------------------------------------------------------

/// The only fields auto-fix is allowed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FixField {
    ParticipationRate,
    PersonnelCost,
    DeclaredTotalBudget,
}

impl FixField {
    /// The entity type that owns this field.
    #[must_use]
    pub const fn entity_type(self) -> EntityType {
        match self {
            Self::ParticipationRate => EntityType::Member,
            Self::PersonnelCost => EntityType::BudgetPeriod,
            Self::DeclaredTotalBudget => EntityType::Project,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParticipationRate => "participation_rate",
            Self::PersonnelCost => "personnel_cost",
            Self::DeclaredTotalBudget => "declared_total_budget",
        }
    }
}

impl fmt::Display for FixField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
