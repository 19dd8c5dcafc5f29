use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tally import`.
pub async fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", args.file))?;

    let response = ctx
        .service()
        .import_json(value)
        .await
        .with_context(|| format!("failed to import {}", args.file))?;
    output(&response, flags.format)
}
