use anyhow::Context;
use chrono::NaiveDate;
use tally_core::period::DateRange;
use tally_core::report::EmployeeSummary;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ParticipationArgs;
use crate::context::AppContext;
use crate::output::output_with_rows;

/// Handle `tally participation`.
pub async fn handle(
    args: &ParticipationArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let window = match (&args.from, &args.to) {
        (Some(from), Some(to)) => Some(DateRange {
            start: parse_date(from, "--from")?,
            end: parse_date(to, "--to")?,
        }),
        _ => None,
    };

    let summary = ctx.engine.employee_summary(&args.employee, window).await?;
    output_with_rows(&summary, assignment_rows, flags.format)
}

fn parse_date(value: &str, flag: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("{flag} must be YYYY-MM-DD, got '{value}'"))
}

/// Table view: one row per counted assignment, with the total on each.
fn assignment_rows(summary: &EmployeeSummary) -> Vec<serde_json::Value> {
    summary
        .assignments
        .iter()
        .map(|a| {
            serde_json::json!({
                "member": a.member_id,
                "project": a.project_id,
                "rate": a.rate,
                "from": a.range.start,
                "to": a.range.end,
                "total": summary.total_rate,
                "status": summary.status,
            })
        })
        .collect()
}
