//! Storage-boundary implementations for `TallyService`.
//!
//! [`SnapshotLoader`] maps the repo reads onto the engine's lookups.
//! [`FixWriter`] opens a libSQL transaction per project; every setter is an
//! `UPDATE ... WHERE id = ? AND version = ?` that bumps the version, and zero
//! changed rows means the entity moved on since the snapshot was loaded.

use chrono::Utc;

use tally_core::Money;
use tally_core::entities::{BudgetPeriod, Employee, EvidenceItem, Member, Project};
use tally_core::enums::{CostCategory, EntityType, FixField, ProjectStatus};
use tally_core::report::FixValue;
use tally_core::store::{FixTransaction, FixWriter, SnapshotLoader, StoreError};
use tally_core::trail::FixTrailEntry;

use crate::error::DatabaseError;
use crate::service::TallyService;
use crate::trail::writer::FixTrail;

fn not_found(entity_type: EntityType, id: &str) -> impl FnOnce(DatabaseError) -> StoreError {
    let id = id.to_string();
    move |error| match error {
        DatabaseError::NoResult => StoreError::NotFound { entity_type, id },
        other => other.into(),
    }
}

impl SnapshotLoader for TallyService {
    async fn get_project(&self, project_id: &str) -> Result<Project, StoreError> {
        TallyService::get_project(self, project_id)
            .await
            .map_err(not_found(EntityType::Project, project_id))
    }

    async fn get_project_budgets(
        &self,
        project_id: &str,
    ) -> Result<Vec<BudgetPeriod>, StoreError> {
        Ok(self.list_budget_periods(project_id).await?)
    }

    async fn get_project_members(&self, project_id: &str) -> Result<Vec<Member>, StoreError> {
        Ok(self.list_project_members(project_id).await?)
    }

    async fn get_employee_members(&self, employee_id: &str) -> Result<Vec<Member>, StoreError> {
        Ok(self.list_employee_members(employee_id).await?)
    }

    async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.find_employee(employee_id).await?)
    }

    async fn get_evidence_items(
        &self,
        project_id: &str,
        category: Option<CostCategory>,
    ) -> Result<Vec<EvidenceItem>, StoreError> {
        Ok(self.list_project_evidence(project_id, category).await?)
    }

    async fn get_active_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.list_projects_by_status(ProjectStatus::Active).await?)
    }
}

impl FixWriter for TallyService {
    type Tx = TallyFixTransaction;

    async fn begin(&self, project_id: &str) -> Result<Self::Tx, StoreError> {
        let tx = self
            .db()
            .conn()
            .transaction()
            .await
            .map_err(DatabaseError::from)?;
        Ok(TallyFixTransaction {
            tx,
            project_id: project_id.to_string(),
            trail: self.trail().clone(),
            pending: Vec::new(),
        })
    }
}

/// One project's fix transaction.
///
/// Trail entries are buffered and written only after the commit succeeds.
pub struct TallyFixTransaction {
    tx: libsql::Transaction,
    project_id: String,
    trail: FixTrail,
    pending: Vec<FixTrailEntry>,
}

/// The entity one versioned write targets.
struct FixTarget<'a> {
    entity: EntityType,
    field: FixField,
    id: &'a str,
    expected_version: i64,
    value: FixValue,
}

impl TallyFixTransaction {
    async fn versioned_update(
        &mut self,
        target: FixTarget<'_>,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<(), StoreError> {
        let changed = self
            .tx
            .execute(sql, params)
            .await
            .map_err(DatabaseError::from)?;
        if changed == 0 {
            return Err(StoreError::Conflict {
                entity_type: target.entity,
                id: target.id.to_string(),
                expected_version: target.expected_version,
            });
        }
        tracing::debug!(
            entity = %target.entity,
            id = target.id,
            field = %target.field,
            "fix written"
        );
        self.pending.push(FixTrailEntry {
            v: 1,
            ts: String::new(),
            project_id: self.project_id.clone(),
            entity: target.entity,
            id: target.id.to_string(),
            field: target.field,
            value: target.value,
            version: target.expected_version + 1,
        });
        Ok(())
    }
}

impl FixTransaction for TallyFixTransaction {
    async fn set_participation_rate(
        &mut self,
        member_id: &str,
        expected_version: i64,
        rate: f64,
    ) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        self.versioned_update(
            FixTarget {
                entity: EntityType::Member,
                field: FixField::ParticipationRate,
                id: member_id,
                expected_version,
                value: FixValue::Rate(rate),
            },
            "UPDATE project_members
             SET participation_rate = ?1, version = version + 1, updated_at = ?2
             WHERE id = ?3 AND version = ?4",
            libsql::params![rate, now, member_id, expected_version],
        )
        .await
    }

    async fn set_period_personnel_cost(
        &mut self,
        period_id: &str,
        expected_version: i64,
        amount: Money,
    ) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        self.versioned_update(
            FixTarget {
                entity: EntityType::BudgetPeriod,
                field: FixField::PersonnelCost,
                id: period_id,
                expected_version,
                value: FixValue::Amount(amount),
            },
            "UPDATE project_budgets
             SET personnel_cash = ?1 - MIN(personnel_in_kind, ?1),
                 personnel_in_kind = MIN(personnel_in_kind, ?1),
                 version = version + 1, updated_at = ?2
             WHERE id = ?3 AND version = ?4",
            libsql::params![amount, now, period_id, expected_version],
        )
        .await
    }

    async fn set_project_declared_total(
        &mut self,
        project_id: &str,
        expected_version: i64,
        amount: Money,
    ) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        self.versioned_update(
            FixTarget {
                entity: EntityType::Project,
                field: FixField::DeclaredTotalBudget,
                id: project_id,
                expected_version,
                value: FixValue::Amount(amount),
            },
            "UPDATE projects
             SET declared_total_budget = ?1, version = version + 1, updated_at = ?2
             WHERE id = ?3 AND version = ?4",
            libsql::params![amount, now, project_id, expected_version],
        )
        .await
    }

    async fn commit(self) -> Result<(), StoreError> {
        let Self {
            tx,
            project_id,
            trail,
            mut pending,
        } = self;
        tx.commit().await.map_err(DatabaseError::from)?;

        let ts = Utc::now().to_rfc3339();
        for entry in &mut pending {
            entry.ts.clone_from(&ts);
        }
        if let Err(error) = trail.append(&pending) {
            tracing::warn!(%project_id, %error, "fix trail append failed after commit");
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await.map_err(DatabaseError::from)?;
        Ok(())
    }
}
