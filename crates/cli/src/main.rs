use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use connectors::sql::base::adapter::SqlAdapter;
use engine_config::settings::{
    Settings,
    context::{build_stage, connect},
};
use engine_core::{
    mapper::DocumentMap,
    progress::TracingProgressSink,
    stage::Stage,
};
use model::events::progress::ProgressLevel;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "grid-migrate",
    version = "0.1.0",
    about = "Migrates order grid tables between Magento databases"
)]
struct Cli {
    /// Log at debug level and show per-document progress
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Runs `stage`, treating a run that reports itself incomplete as a failure.
async fn complete(stage: &mut dyn Stage) -> Result<(), CliError> {
    if stage.perform().await? {
        Ok(())
    } else {
        Err(CliError::Incomplete(stage.name().to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Migrate { config } => {
            let settings = Settings::load(&config)?;
            let level = if cli.verbose {
                ProgressLevel::Debug
            } else {
                settings.progress.level
            };

            let mut stage = build_stage(&settings, Arc::new(TracingProgressSink::new(level))).await?;
            info!(stage = stage.name(), config = %config, "Starting migration");
            complete(&mut stage).await?;
            output::print_summary(&stage.metrics());
        }
        Commands::Documents { config, json } => {
            let settings = Settings::load(&config)?;
            let map = DocumentMap::new(settings.documents()?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(map.documents())?);
            } else {
                output::print_documents(map.documents());
            }
        }
        Commands::Check { config } => {
            let settings = Settings::load(&config)?;
            let map = DocumentMap::new(settings.documents()?)?;
            let (source, _destination) = connect(&settings).await?;

            let mut results = Vec::with_capacity(map.len());
            for doc in map.documents() {
                let table = source.table_ref(&doc.source);
                let exists = source
                    .adapter()
                    .table_exists(table.schema.as_deref(), &table.name)
                    .await?;
                results.push((table.name, exists));
            }
            output::print_source_check(&results);
        }
    }

    Ok(())
}
