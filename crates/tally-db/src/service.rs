//! Service layer over the database, fix trail, and schema registry.
//!
//! `TallyService` wraps `TallyDb` (raw database access), `FixTrail` (JSONL
//! persistence), and `SchemaRegistry` (import validation). Repo methods are
//! implemented as `impl TallyService` blocks; the storage-boundary traits
//! live in [`crate::store`].

use std::path::PathBuf;

use tally_schema::SchemaRegistry;

use crate::TallyDb;
use crate::error::DatabaseError;
use crate::trail::writer::FixTrail;

pub struct TallyService {
    db: TallyDb,
    trail: FixTrail,
    schema: SchemaRegistry,
}

impl TallyService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `trail_dir` - Directory for JSONL fix trail files. Pass `None` to
    ///   disable the trail.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the trail
    /// directory cannot be created.
    pub async fn new_local(
        db_path: &str,
        trail_dir: Option<PathBuf>,
    ) -> Result<Self, DatabaseError> {
        let db = TallyDb::open_local(db_path).await?;
        let trail = match trail_dir {
            Some(dir) => FixTrail::new(dir)?,
            None => FixTrail::disabled(),
        };
        Ok(Self::from_db(db, trail))
    }

    /// Create from an existing `TallyDb` (for testing).
    #[must_use]
    pub fn from_db(db: TallyDb, trail: FixTrail) -> Self {
        Self {
            db,
            trail,
            schema: SchemaRegistry::new(),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TallyDb {
        &self.db
    }

    #[must_use]
    pub const fn trail(&self) -> &FixTrail {
        &self.trail
    }

    #[must_use]
    pub const fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }
}
