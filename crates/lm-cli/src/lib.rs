//! # lm-cli
//!
//! Command-line tool for migrating legacy users into a realm-based
//! identity server:
//! - `lm migrate` — guarded legacy-user migration run
//! - `lm users list` — list users in the target realm

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::MigrateConfig;
pub use error::{CliError, CliResult};
