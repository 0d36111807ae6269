//! Migration run error types.

use lm_client::ClientError;
use thiserror::Error;

/// Fatal errors that stop a migration run.
///
/// Per-record failures never appear here; they are absorbed into the run
/// tally at the reconciliation boundary. A restore failure is not an error
/// variant either: it is carried separately on the run report so operators
/// can tell "some users failed" apart from "provider left disabled".
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Admin token acquisition failed before any mutation.
    #[error("admin authentication failed: {0}")]
    Auth(String),

    /// The legacy listing could not be fetched.
    #[error("legacy source unavailable: {0}")]
    Source(String),

    /// The guard could not read or disable the provider component.
    #[error("federation guard error: {0}")]
    Guard(String),
}

impl From<ClientError> for MigrateError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Auth(detail) => Self::Auth(detail),
            ClientError::Source(detail) => Self::Source(detail),
            // Api/Http errors only propagate to the run from guard calls;
            // reconciliation catches its own.
            other => Self::Guard(other.to_string()),
        }
    }
}

/// Result alias for run-level operations.
pub type MigrateResult<T> = Result<T, MigrateError>;
