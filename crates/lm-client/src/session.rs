//! Admin token acquisition.

use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::normalize_base_url;

/// Token endpoint response; only the access token is consumed.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Obtains the single short-lived admin bearer token for a migration run.
///
/// Uses the password grant with a fixed client identity against the admin
/// realm's token endpoint. There is no retry and no refresh: a token
/// failure aborts the run before anything is mutated.
#[derive(Clone)]
pub struct AdminSession {
    http: reqwest::Client,
    base_url: String,
    admin_realm: String,
    client_id: String,
    username: String,
    password: String,
}

impl AdminSession {
    /// Creates a session against the given server's admin realm.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        admin_realm: impl Into<String>,
        client_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            admin_realm: admin_realm.into(),
            client_id: client_id.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Performs the password-grant token request and returns the bearer
    /// token string.
    ///
    /// Any HTTP failure, non-2xx response, or response without an
    /// `access_token` field maps to [`ClientError::Auth`] with the error
    /// body preserved as diagnostic detail.
    pub async fn acquire_token(&self) -> ClientResult<String> {
        let endpoint = format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.base_url, self.admin_realm
        );
        debug!(realm = %self.admin_realm, "fetching admin access token");

        let params = [
            ("grant_type", "password"),
            ("client_id", self.client_id.as_str()),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ];

        let response = self
            .http
            .post(&endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(ClientError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::Auth("response missing access token".to_string()))
    }
}
