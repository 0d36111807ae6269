//! CLI argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

/// Legacy user migration tool.
#[derive(Debug, Parser)]
#[command(name = "lm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Identity server base URL (overrides config).
    #[arg(short, long, env = "KEYCLOAK_URL")]
    pub server: Option<String>,

    /// Target realm (overrides config).
    #[arg(short, long, env = "KEYCLOAK_REALM")]
    pub realm: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs the guarded legacy-user migration.
    Migrate(MigrateArgs),

    /// User queries against the target realm.
    #[command(subcommand)]
    Users(UsersCommand),
}

/// Arguments for the migrate command.
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Legacy store base URL.
    #[arg(long, env = "LEGACY_URL")]
    pub legacy_url: Option<String>,

    /// Legacy listing endpoint path.
    #[arg(long, env = "LEGACY_ENDPOINT")]
    pub legacy_endpoint: Option<String>,

    /// Federation provider component id to guard during the run.
    #[arg(long, env = "LEGACY_PROVIDER_ID")]
    pub provider_id: Option<String>,
}

/// User subcommands.
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Lists users in the target realm.
    List {
        /// Search filter passed through to the users endpoint.
        #[arg(long, env = "KEYCLOAK_USER_SEARCH")]
        search: Option<String>,

        /// Maximum number of users to return.
        #[arg(long, env = "KEYCLOAK_USER_LIMIT")]
        max: Option<u32>,
    },
}
