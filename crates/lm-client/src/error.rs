//! Client error types.

use thiserror::Error;

/// Errors from the HTTP collaborators.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Admin token acquisition failed. Fatal: every later call depends on
    /// the token, so the run aborts before any mutation.
    #[error("admin authentication failed: {0}")]
    Auth(String),

    /// The legacy source listing could not be fetched. Fatal: there is no
    /// partial migration without a full working set.
    #[error("legacy source unavailable: {0}")]
    Source(String),

    /// The admin API answered with an unexpected status. The response body
    /// is preserved as diagnostic detail, not swallowed.
    #[error("admin API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
