//! Legacy user migration CLI entry point.

#![forbid(unsafe_code)]

use clap::Parser;
use lm_cli::{
    cli::{Cli, Command},
    commands::{run_migrate, run_users},
    config::MigrateConfig,
    output::error,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match MigrateConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Migrate(args) => {
            run_migrate(args, &config, cli.server.as_deref(), cli.realm.as_deref()).await
        }
        Command::Users(cmd) => {
            run_users(
                cmd,
                &config,
                cli.server.as_deref(),
                cli.realm.as_deref(),
                cli.output,
            )
            .await
        }
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
