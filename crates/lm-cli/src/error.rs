//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error from an HTTP collaborator.
    #[error(transparent)]
    Client(#[from] lm_client::ClientError),

    /// HTTP client construction or request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The migration run finished with failures; details were already
    /// reported per record and in the final tally.
    #[error("migration finished with failures")]
    MigrationFailed,
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
