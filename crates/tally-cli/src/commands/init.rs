use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use tally_config::TallyConfig;
use tally_db::TallyDb;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::context::{database_path, ensure_parent_dir};
use crate::output::output;

const CONFIG_TEMPLATE: &str = r#"# Tally project configuration.
# Environment variables (TALLY_SECTION__KEY) override these values.

[database]
path = ".tally/tally.db"
# Directory for the JSONL fix trail; leave empty to disable.
trail_dir = ".tally/trail"

[validation]
# Allowed |declared - actual| personnel cost difference per period.
personnel_tolerance = 1000
# Maximum concurrent participation per employee, in percent.
participation_limit = 100.0
# Usage ratio above which a period is flagged.
max_usage_rate = 1.0

[general]
default_format = "json"
"#;

#[derive(Debug, Serialize)]
struct InitResponse {
    config_path: String,
    config_written: bool,
    database_path: String,
}

/// Handle `tally init`.
pub async fn handle(
    args: &InitArgs,
    config: &TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let config_path = PathBuf::from(".tally/config.toml");
    std::fs::create_dir_all(".tally").context("failed to create .tally directory")?;

    let config_written = args.force || !config_path.exists();
    if config_written {
        std::fs::write(&config_path, CONFIG_TEMPLATE)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
    }

    let db_path = database_path(config, flags);
    ensure_parent_dir(&db_path)?;
    TallyDb::open_local(&db_path)
        .await
        .with_context(|| format!("failed to initialize database at {db_path}"))?;
    tracing::info!(db = %db_path, config_written, "tally initialized");

    output(
        &InitResponse {
            config_path: config_path.display().to_string(),
            config_written,
            database_path: db_path,
        },
        flags.format,
    )
}
