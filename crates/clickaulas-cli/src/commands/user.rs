//! User listing commands.

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use clickaulas_entity::{User, UserRole};

use crate::output::{self, OutputFormat};

/// Arguments for the user command
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users, optionally restricted to one role
    List {
        /// Role filter
        #[arg(short, long, value_enum)]
        role: Option<RoleArg>,
    },
}

/// Role accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Admin,
    Coordinator,
    Teacher,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => UserRole::Admin,
            RoleArg::Coordinator => UserRole::Coordinator,
            RoleArg::Teacher => UserRole::Teacher,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
    department: String,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            department: user.department.unwrap_or_default(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, env: &str, format: OutputFormat) -> anyhow::Result<()> {
    let config = super::load_config(env)?;
    let stores = super::open_stores(&config).await?;

    match &args.command {
        UserCommand::List { role } => {
            let users = stores.users.list_users(role.map(UserRole::from)).await?;
            let rows: Vec<UserRow> = users.into_iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
