use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create `.tally/` with a default config and an empty database.
    Init(InitArgs),
    /// Load a JSON dataset (projects, employees, budgets, members, evidence).
    Import(ImportArgs),
    /// Validate one project.
    Validate(ValidateArgs),
    /// Validate every active project.
    Bulk(BulkArgs),
    /// Show one employee's participation across all projects.
    Participation(ParticipationArgs),
    /// Print a JSON Schema.
    Schema(SchemaArgs),
}

/// Arguments for `tally init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `tally import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Path to the dataset JSON file.
    pub file: String,
}

/// Arguments for `tally validate`.
#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// `all` or a comma-separated list of validators
    /// (participation_rate, employment_period, personnel_cost,
    /// budget_consistency, usage_rate).
    #[arg(default_value = "all")]
    pub validators: String,

    /// Project id.
    #[arg(long)]
    pub project: String,

    /// Write corrections back inside one transaction.
    #[arg(long)]
    pub auto_fix: bool,
}

/// Arguments for `tally bulk`.
#[derive(Clone, Debug, Args)]
pub struct BulkArgs {
    /// `all` or a comma-separated list of validators.
    #[arg(default_value = "all")]
    pub validators: String,

    #[arg(long)]
    pub auto_fix: bool,
}

/// Arguments for `tally participation`.
#[derive(Clone, Debug, Args)]
pub struct ParticipationArgs {
    /// Employee id.
    pub employee: String,

    /// Window start (YYYY-MM-DD).
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Window end (YYYY-MM-DD).
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

/// Arguments for `tally schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name, e.g. `dataset` or `validation_report`.
    #[arg(required_unless_present = "list")]
    pub name: Option<String>,

    /// List the available schema names.
    #[arg(long, conflicts_with = "name")]
    pub list: bool,
}
