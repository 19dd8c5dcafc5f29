use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Validate(args) => commands::validate::handle(&args, ctx, flags).await,
        Commands::Bulk(args) => commands::bulk::handle(&args, ctx, flags).await,
        Commands::Participation(args) => commands::participation::handle(&args, ctx, flags).await,
        Commands::Init(_) | Commands::Schema(_) => {
            anyhow::bail!("init and schema run before the database is opened")
        }
    }
}
