//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod serve;
pub mod user;

use anyhow::Context;
use clap::{Parser, Subcommand};

use clickaulas_core::config::AppConfig;
use clickaulas_database::Stores;

use crate::output::OutputFormat;

/// ClickAulas: school scheduling and records administration
#[derive(Debug, Parser)]
#[command(name = "clickaulas", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (`config/{env}.toml`)
    #[arg(short, long, env = "CLICKAULAS_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Administrator accounts
    Admin(admin::AdminArgs),
    /// User listing
    User(user::UserArgs),
}

impl Cli {
    /// Log filter selected by `-v`.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env, self.format).await,
            Commands::Admin(args) => admin::execute(args, &self.env).await,
            Commands::User(args) => user::execute(args, &self.env, self.format).await,
        }
    }
}

/// Helper: load configuration for `env`
pub fn load_config(env: &str) -> anyhow::Result<AppConfig> {
    AppConfig::load(env).with_context(|| format!("Failed to load configuration for '{env}'"))
}

/// Helper: open the configured store backend
pub async fn open_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    Stores::open(&config.database)
        .await
        .context("Failed to open the store")
}
