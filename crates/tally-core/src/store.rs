//! The storage boundary the validation engine reads from and writes back to.
//!
//! The CRUD layer implements these traits; validators never see them. The
//! orchestrator loads a snapshot through [`SnapshotLoader`] and, in auto-fix
//! mode, opens one [`FixTransaction`] per project through [`FixWriter`].
//!
//! Every setter carries the version the entity had when the snapshot was
//! loaded. Implementations must refuse the write with
//! [`StoreError::Conflict`] when the stored version differs.

use thiserror::Error;

use crate::Money;
use crate::entities::{BudgetPeriod, Employee, EvidenceItem, Member, Project};
use crate::enums::{CostCategory, EntityType};

/// Errors surfaced by a storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// The entity changed after the snapshot was loaded.
    #[error("{entity_type} {id} was modified concurrently (expected version {expected_version})")]
    Conflict {
        entity_type: EntityType,
        id: String,
        expected_version: i64,
    },

    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Backend(String),
}

/// Read side: point-in-time lookups used to assemble a project snapshot.
#[allow(async_fn_in_trait)]
pub trait SnapshotLoader {
    /// Fetch one project.
    async fn get_project(&self, project_id: &str) -> Result<Project, StoreError>;

    /// All budget periods of a project, ordered by period number.
    async fn get_project_budgets(&self, project_id: &str)
    -> Result<Vec<BudgetPeriod>, StoreError>;

    /// All participation records of a project.
    async fn get_project_members(&self, project_id: &str) -> Result<Vec<Member>, StoreError>;

    /// Every participation record of one employee, across all projects.
    async fn get_employee_members(&self, employee_id: &str) -> Result<Vec<Member>, StoreError>;

    /// One employee, or `None` for a dangling reference.
    async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError>;

    /// Evidence items of all periods of a project, optionally one category only.
    async fn get_evidence_items(
        &self,
        project_id: &str,
        category: Option<CostCategory>,
    ) -> Result<Vec<EvidenceItem>, StoreError>;

    /// Projects whose status is `active`.
    async fn get_active_projects(&self) -> Result<Vec<Project>, StoreError>;
}

/// Write side: opens the per-project transaction corrective writes go through.
#[allow(async_fn_in_trait)]
pub trait FixWriter {
    type Tx: FixTransaction;

    /// Begin the transaction for one project's fixes.
    async fn begin(&self, project_id: &str) -> Result<Self::Tx, StoreError>;
}

/// Narrow setters scoped to one entity id each, plus commit/rollback.
#[allow(async_fn_in_trait)]
pub trait FixTransaction {
    async fn set_participation_rate(
        &mut self,
        member_id: &str,
        expected_version: i64,
        rate: f64,
    ) -> Result<(), StoreError>;

    /// Set a period's personnel total. The in-kind portion is capped at the
    /// new total and cash takes the remainder.
    async fn set_period_personnel_cost(
        &mut self,
        period_id: &str,
        expected_version: i64,
        amount: Money,
    ) -> Result<(), StoreError>;

    async fn set_project_declared_total(
        &mut self,
        project_id: &str,
        expected_version: i64,
        amount: Money,
    ) -> Result<(), StoreError>;

    async fn commit(self) -> Result<(), StoreError>;

    async fn rollback(self) -> Result<(), StoreError>;
}
