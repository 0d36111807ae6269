//! Command implementations.

use std::time::Duration;

pub mod migrate;
pub mod users;

pub use migrate::run_migrate;
pub use users::run_users;

/// Builds the HTTP client shared by all collaborators in a command.
pub(crate) fn http_client() -> crate::CliResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(Into::into)
}
