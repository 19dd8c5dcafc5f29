use serde::Serialize;
use tally_core::report::{ValidationDetails, ValidationReport, ValidationResult};
use tally_validate::ValidatorSelection;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::context::AppContext;
use crate::output::output_with_rows;

/// One table row per validator that ran.
#[derive(Debug, Serialize)]
pub struct ResultRow {
    pub validator: String,
    pub valid: bool,
    pub items: u32,
    pub invalid: u32,
    pub message: String,
}

/// Handle `tally validate`.
pub async fn handle(args: &ValidateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let selection = ValidatorSelection::parse(&args.validators)?;
    let report = ctx
        .engine
        .validate_project(&args.project, &selection, args.auto_fix)
        .await?;
    if let Some(note) = &report.fix_error {
        tracing::warn!(project = %report.project_id, "{note}");
    }
    output_with_rows(&report, result_rows, flags.format)
}

pub fn result_rows(report: &ValidationReport) -> Vec<ResultRow> {
    let results = match &report.validation.details {
        ValidationDetails::Combined { results } => results.iter().collect(),
        _ => vec![&report.validation],
    };
    results.into_iter().map(row).collect()
}

fn row(result: &ValidationResult) -> ResultRow {
    ResultRow {
        validator: result
            .kind()
            .map_or_else(|| "combined".to_string(), |k| k.to_string()),
        valid: result.is_valid,
        items: result.summary.total_items,
        invalid: result.summary.invalid_items,
        message: result.message.clone(),
    }
}
