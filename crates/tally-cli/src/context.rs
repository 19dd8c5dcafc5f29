use std::path::{Path, PathBuf};

use anyhow::Context;
use tally_config::TallyConfig;
use tally_db::service::TallyService;
use tally_validate::Orchestrator;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub engine: Orchestrator<TallyService>,
}

impl AppContext {
    /// Open the database (running migrations) and build the engine.
    pub async fn init(config: &TallyConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db_path = database_path(config, flags);
        ensure_parent_dir(&db_path)?;

        let trail_dir = config
            .database
            .trail_enabled()
            .then(|| PathBuf::from(&config.database.trail_dir));

        let service = TallyService::new_local(&db_path, trail_dir)
            .await
            .with_context(|| format!("failed to open database at {db_path}"))?;
        tracing::debug!(db = %db_path, trail = config.database.trail_enabled(), "storage ready");

        let engine = Orchestrator::new(service, config.validation);
        Ok(Self { engine })
    }

    pub const fn service(&self) -> &TallyService {
        self.engine.store()
    }
}

/// `--db` wins over `database.path`.
pub fn database_path(config: &TallyConfig, flags: &GlobalFlags) -> String {
    flags
        .db
        .clone()
        .unwrap_or_else(|| config.database.path.clone())
}

pub fn ensure_parent_dir(db_path: &str) -> anyhow::Result<()> {
    if db_path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = Path::new(db_path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}
