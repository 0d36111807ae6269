//! Legacy store listing client.

use lm_model::LegacyUser;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::normalize_base_url;

/// Fetches the full legacy user working set for a run.
///
/// The listing endpoint has no pagination or filtering: whatever it
/// returns is the complete set to migrate, in source order.
#[derive(Clone)]
pub struct LegacySource {
    http: reqwest::Client,
    base_url: String,
    endpoint: String,
}

impl LegacySource {
    /// Creates a source for the given base URL and endpoint path.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            endpoint: endpoint.into(),
        }
    }

    /// Single GET of the whole listing.
    ///
    /// Any transport failure or non-2xx response is
    /// [`ClientError::Source`], which is fatal for the run.
    pub async fn fetch_all(&self) -> ClientResult<Vec<LegacyUser>> {
        let url = format!("{}{}", self.base_url, self.endpoint);
        debug!(%url, "fetching legacy users");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Source(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(ClientError::Source(format!(
                "listing endpoint returned {status}: {body}"
            )));
        }

        let users: Vec<LegacyUser> = response
            .json()
            .await
            .map_err(|e| ClientError::Source(e.to_string()))?;
        debug!(count = users.len(), "retrieved legacy users");
        Ok(users)
    }
}
