use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::settings::get_settings;
use trivia_api::telemetry::init_tracing;
use trivia_api::transfer::{export_data, import_data};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Write categories.csv and questions.csv to a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = get_settings()?;
    let pool = establish_connection(&settings.database)
        .await
        .context("Cannot connect to DB")?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::Export { path } => {
            let done = export_data(&pool, &path).await.context("Cannot export")?;
            tracing::info!(
                categories = done.categories,
                questions = done.questions,
                "Exported to {}",
                path.display()
            );
        }
        Commands::Import { path } => {
            let done = import_data(&pool, &path).await.context("Cannot import")?;
            tracing::info!(
                categories = done.categories,
                questions = done.questions,
                "Imported from {}",
                path.display()
            );
        }
    }
    Ok(())
}
