//! `clickaulas-server`: loads configuration, opens the store and serves the API.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use clickaulas_core::config::{AppConfig, LogFormat, LoggingConfig};
use clickaulas_core::error::AppError;
use clickaulas_database::Stores;

/// Selects `config/{env}.toml`.
const ENV_VAR: &str = "CLICKAULAS_ENV";

#[tokio::main]
async fn main() -> ExitCode {
    let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());

    // Logging is configured from the file, so a load failure goes to stderr.
    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("clickaulas-server: cannot load configuration for '{env}': {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging);

    match run(&env, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = %e.kind, error = %e.message, "Server stopped with an error");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match config.format {
        LogFormat::Json => builder.json().with_current_span(false).init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

async fn run(env: &str, config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %env,
        "Starting ClickAulas"
    );

    let stores = Stores::open(&config.database).await?;
    clickaulas_api::run_server(config, stores).await
}
