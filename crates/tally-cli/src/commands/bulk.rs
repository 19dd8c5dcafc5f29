use serde::Serialize;
use tally_core::report::BulkReport;
use tally_validate::ValidatorSelection;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BulkArgs;
use crate::context::AppContext;
use crate::output::output_with_rows;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
pub struct ProjectRow {
    pub project: String,
    pub title: String,
    pub valid: Option<bool>,
    pub issues: u32,
    pub fixes: usize,
    pub error: Option<String>,
}

/// Handle `tally bulk`.
pub async fn handle(args: &BulkArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let selection = ValidatorSelection::parse(&args.validators)?;
    let progress = Progress::spinner("validating active projects");

    let bulk = match ctx.engine.validate_all_active(&selection, args.auto_fix).await {
        Ok(bulk) => bulk,
        Err(error) => {
            progress.finish_err("bulk validation failed");
            return Err(error.into());
        }
    };
    progress.finish_ok(&format!(
        "{} projects, {} failed, {} fixed issues",
        bulk.summary.total_projects, bulk.summary.failed_projects, bulk.summary.total_fixed_issues
    ));

    output_with_rows(&bulk, project_rows, flags.format)
}

pub fn project_rows(bulk: &BulkReport) -> Vec<ProjectRow> {
    bulk.projects
        .iter()
        .map(|entry| ProjectRow {
            project: entry.project_id.clone(),
            title: entry.project_title.clone(),
            valid: entry.report.as_ref().map(|r| r.validation.is_valid),
            issues: entry.report.as_ref().map_or(0, |r| r.summary.invalid_items),
            fixes: entry.report.as_ref().map_or(0, |r| r.fixes.len()),
            error: entry.error.clone(),
        })
        .collect()
}
