//! Bulk import of a [`Dataset`] in one transaction.

use std::time::Instant;

use tally_core::dataset::Dataset;
use tally_core::responses::ImportResponse;

use super::budget::insert_period;
use super::employee::insert_employee;
use super::evidence::insert_evidence;
use super::member::insert_member;
use super::project::insert_project;
use crate::error::DatabaseError;
use crate::service::TallyService;

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

async fn insert_all(conn: &libsql::Connection, dataset: &Dataset) -> Result<(), DatabaseError> {
    for project in &dataset.projects {
        insert_project(conn, project).await?;
    }
    for employee in &dataset.employees {
        insert_employee(conn, employee).await?;
    }
    for period in &dataset.budgets {
        insert_period(conn, period).await?;
    }
    for member in &dataset.members {
        insert_member(conn, member).await?;
    }
    for item in &dataset.evidence {
        insert_evidence(conn, item).await?;
    }
    Ok(())
}

impl TallyService {
    /// Insert every record of the dataset. All or nothing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on the first failing insert (duplicate id,
    /// dangling project or period reference); nothing is written in that case.
    pub async fn import_dataset(&self, dataset: &Dataset) -> Result<ImportResponse, DatabaseError> {
        let started = Instant::now();
        let tx = self.db().conn().transaction().await?;

        if let Err(error) = insert_all(&tx, dataset).await {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(%rollback, "import rollback failed");
            }
            return Err(error);
        }
        tx.commit().await?;

        let response = ImportResponse {
            projects: count(dataset.projects.len()),
            employees: count(dataset.employees.len()),
            budgets: count(dataset.budgets.len()),
            members: count(dataset.members.len()),
            evidence: count(dataset.evidence.len()),
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        tracing::info!(records = dataset.len(), "dataset imported");
        Ok(response)
    }

    /// Check raw JSON against the `dataset` schema, then import it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Schema` if the JSON does not match, otherwise
    /// as [`Self::import_dataset`].
    pub async fn import_json(
        &self,
        value: serde_json::Value,
    ) -> Result<ImportResponse, DatabaseError> {
        self.schema().validate("dataset", &value)?;
        let dataset: Dataset =
            serde_json::from_value(value).map_err(|e| DatabaseError::Other(e.into()))?;
        self.import_dataset(&dataset).await
    }
}
