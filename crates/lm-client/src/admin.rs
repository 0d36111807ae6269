//! Authenticated client for the realm admin API.

use lm_model::{ComponentRepresentation, UserRepresentation};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};
use crate::normalize_base_url;

/// HTTP client for realm-scoped admin endpoints.
///
/// Carries the bearer token acquired at run start; every request is
/// authenticated with it.
#[derive(Clone)]
pub struct AdminApiClient {
    http: reqwest::Client,
    base_url: String,
    realm: String,
    token: String,
}

impl AdminApiClient {
    /// Creates a client for one realm with the given bearer token.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        realm: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            realm: realm.into(),
            token: token.into(),
        }
    }

    /// The realm this client operates on.
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/admin/realms/{}{}", self.base_url, self.realm, path)
    }

    /// POSTs a new user and returns the response status for dispatch.
    ///
    /// Statuses below 500 (201 created, 409 conflict, 4xx validation) are
    /// protocol outcomes the reconciliation rules branch on; 5xx and
    /// transport failures are errors.
    pub async fn create_user(&self, user: &UserRepresentation) -> ClientResult<StatusCode> {
        let response = self
            .http
            .post(self.admin_url("/users"))
            .bearer_auth(&self.token)
            .json(user)
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(status)
    }

    /// Finds the user with exactly the given username, if any.
    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> ClientResult<Option<UserRepresentation>> {
        let path = format!(
            "/users?username={}&exact=true",
            urlencoding::encode(username)
        );
        let users: Vec<UserRepresentation> = self.get_json(&path).await?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    /// Lists realm users with optional search filter and page size.
    pub async fn list_users(
        &self,
        search: Option<&str>,
        max: Option<u32>,
    ) -> ClientResult<Vec<UserRepresentation>> {
        let mut query = Vec::new();
        if let Some(s) = search {
            let s = s.trim();
            if !s.is_empty() {
                query.push(format!("search={}", urlencoding::encode(s)));
            }
        }
        if let Some(m) = max {
            query.push(format!("max={m}"));
        }

        let path = if query.is_empty() {
            "/users".to_string()
        } else {
            format!("/users?{}", query.join("&"))
        };
        self.get_json(&path).await
    }

    /// PUTs the full user body against an existing user id.
    pub async fn update_user(&self, id: &str, user: &UserRepresentation) -> ClientResult<()> {
        let response = self
            .http
            .put(self.admin_url(&format!("/users/{id}")))
            .bearer_auth(&self.token)
            .json(user)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    /// GETs a component by id; 404 maps to `None`.
    pub async fn get_component(&self, id: &str) -> ClientResult<Option<ComponentRepresentation>> {
        let response = self
            .http
            .get(self.admin_url(&format!("/components/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(Some(response.json().await?))
    }

    /// PUTs the full component body against its id.
    pub async fn update_component(
        &self,
        id: &str,
        component: &ComponentRepresentation,
    ) -> ClientResult<()> {
        let response = self
            .http
            .put(self.admin_url(&format!("/components/{id}")))
            .bearer_auth(&self.token)
            .json(component)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self
            .http
            .get(self.admin_url(path))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::Http)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn expect_success(response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
