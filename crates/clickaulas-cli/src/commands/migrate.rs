//! Schema migration commands.

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use clickaulas_database::DatabasePool;
use clickaulas_database::migration::{embedded_migrations, run_migrations};

use crate::output::{self, OutputFormat};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply pending migrations to the configured PostgreSQL database
    Run,
    /// Show the migrations compiled into this binary
    List,
}

#[derive(Debug, Serialize, Tabled)]
struct MigrationRow {
    version: i64,
    description: String,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, env: &str, format: OutputFormat) -> anyhow::Result<()> {
    match &args.command {
        MigrateCommand::Run => run(env).await,
        MigrateCommand::List => {
            let rows: Vec<MigrationRow> = embedded_migrations()
                .into_iter()
                .map(|(version, description)| MigrationRow {
                    version,
                    description,
                })
                .collect();
            output::print_list(&rows, format);
            Ok(())
        }
    }
}

async fn run(env: &str) -> anyhow::Result<()> {
    let config = super::load_config(env)?;
    if config.database.is_memory() {
        bail!("database.url is memory://; migrations need a PostgreSQL url");
    }

    let pool = DatabasePool::connect(&config.database)
        .await
        .context("Failed to connect to PostgreSQL")?;
    let result = run_migrations(pool.pool()).await;
    pool.close().await;
    result.context("Migration failed")?;

    output::print_success("Schema is up to date.");
    Ok(())
}
