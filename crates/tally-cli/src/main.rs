use clap::Parser;
use tally_config::TallyConfig;
use tally_validate::EngineError;

mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    let format = cli.format.unwrap_or(cli::OutputFormat::Json);

    if let Err(error) = run(cli).await {
        eprintln!("tally error: {error:#}");
        output::output_error(&error, format);
        std::process::exit(exit_code(&error));
    }
}

async fn run(cli: cli::Cli) -> anyhow::Result<()> {
    init_tracing(cli.quiet, cli.verbose)?;

    let config = TallyConfig::load_with_dotenv()?;
    let flags = cli.global_flags(&config.general.default_format);
    ui::init(&flags);

    match &cli.command {
        cli::Commands::Init(args) => return commands::init::handle(args, &config, &flags).await,
        cli::Commands::Schema(args) => return commands::schema::handle(args, &flags),
        _ => {}
    }

    let ctx = context::AppContext::init(&config, &flags).await?;
    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

/// 2 for caller errors (bad input, unknown ids), 1 for everything else.
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<EngineError>() {
        Some(engine) if engine.status_code() == 400 => 2,
        _ => 1,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TALLY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
