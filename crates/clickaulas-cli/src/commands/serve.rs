//! `serve`: run the HTTP API in the foreground.

use anyhow::Context;
use clap::Args;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on instead of `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind instead of `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Use the in-memory store regardless of `database.url`
    #[arg(long)]
    pub memory: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, env: &str) -> anyhow::Result<()> {
    let mut config = super::load_config(env)?;
    config.server.port = args.port.unwrap_or(config.server.port);
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if args.memory {
        config.database.url = clickaulas_core::config::database::MEMORY_URL.to_string();
    }

    let stores = super::open_stores(&config).await?;
    println!(
        "ClickAulas listening on http://{}:{} ({} store)",
        config.server.host, config.server.port, stores.backend
    );

    clickaulas_api::run_server(config, stores)
        .await
        .context("Server stopped with an error")
}
