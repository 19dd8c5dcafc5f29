//! # tally-db
//!
//! libSQL storage for Tally.
//!
//! Holds the relational state the validation engine reads (projects, budget
//! periods, participation records, employees, evidence items) and implements
//! the storage boundary from `tally-core`:
//! - [`SnapshotLoader`](tally_core::store::SnapshotLoader) for point-in-time reads
//! - [`FixWriter`](tally_core::store::FixWriter) for per-project fix transactions
//!   with optimistic version checks
//!
//! Committed fixes are appended to a JSONL fix trail when a trail directory is
//! configured.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod store;
pub mod trail;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and connection.
pub struct TallyDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl TallyDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let tally_db = Self { db, conn };
        tally_db.run_migrations().await?;
        Ok(tally_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> TallyDb {
        TallyDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "projects",
            "employees",
            "project_budgets",
            "project_members",
            "evidence_items",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO project_budgets (id, project_id, period_number, start_date, end_date)
                 VALUES ('bp-1', 'missing', 1, '2024-01-01', '2024-12-31')",
                (),
            )
            .await;
        assert!(result.is_err(), "orphan budget period must be rejected");
    }
}
