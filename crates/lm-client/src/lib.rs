//! # lm-client
//!
//! HTTP collaborators for the legacy user migration tool:
//! - [`AdminSession`] — acquires a single admin bearer token per run
//! - [`AdminApiClient`] — authenticated requests against the realm admin API
//! - [`LegacySource`] — fetches the legacy store's full user listing

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod admin;
pub mod error;
pub mod legacy;
pub mod session;

pub use admin::AdminApiClient;
pub use error::{ClientError, ClientResult};
pub use legacy::LegacySource;
pub use session::AdminSession;

/// Strips a single trailing slash so paths can be appended verbatim.
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}
