//! Administrator account commands.

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use dialoguer::Confirm;

use clickaulas_auth::{CredentialGenerator, PasswordHasher};
use clickaulas_entity::{CreateUser, UserRole};

use crate::output;

/// Arguments for the admin command
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create an administrator with a one-time credential
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Login email
        #[arg(long)]
        email: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, env: &str) -> anyhow::Result<()> {
    match &args.command {
        AdminCommand::Create { name, email, yes } => create(env, name, email, *yes).await,
    }
}

async fn create(env: &str, name: &str, email: &str, yes: bool) -> anyhow::Result<()> {
    let config = super::load_config(env)?;
    if config.database.is_memory() {
        bail!("Accounts created in the in-memory store would not survive this process");
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create administrator '{email}'?"))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            output::print_warning("Cancelled.");
            return Ok(());
        }
    }

    let stores = super::open_stores(&config).await?;
    if stores.users.find_user_by_email(email).await?.is_some() {
        bail!("A user with email '{email}' already exists");
    }

    let credential = CredentialGenerator::new(config.auth.credential_length).generate();
    let mut account = CreateUser::account(name, email, UserRole::Admin);
    account.password_hash = Some(PasswordHasher::new().hash(&credential)?);

    let user = stores
        .users
        .insert_user(&account)
        .await
        .context("Failed to create administrator")?;

    tracing::info!(user_id = %user.id, email = %user.email, "Administrator created from CLI");

    output::print_success("Administrator created.");
    output::print_field("ID", &user.id.to_string());
    output::print_field("Email", &user.email);
    output::print_field("Password", &credential);
    output::print_warning("The password is shown once. Store it now.");

    Ok(())
}
