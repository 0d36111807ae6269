//! User query commands.

use lm_client::{AdminApiClient, AdminSession};
use lm_model::UserRepresentation;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::UsersCommand;
use crate::config::OutputFormat;
use crate::output::output;
use crate::{CliResult, MigrateConfig};

use super::http_client;

/// User row for display.
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID.
    id: String,
    /// Username.
    username: String,
    /// Email address.
    email: String,
    /// Combined first/last name.
    name: String,
    /// Whether the user is enabled.
    enabled: bool,
    /// Federation provider link, if any.
    #[tabled(rename = "federation")]
    federation_link: String,
}

impl From<UserRepresentation> for UserRow {
    fn from(user: UserRepresentation) -> Self {
        let name = [user.first_name.as_deref(), user.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            id: user.id.unwrap_or_default(),
            username: user.username,
            email: user.email.unwrap_or_default(),
            name,
            enabled: user.enabled,
            federation_link: user.federation_link.unwrap_or_default(),
        }
    }
}

/// Runs a users subcommand.
pub async fn run_users(
    cmd: UsersCommand,
    config: &MigrateConfig,
    server: Option<&str>,
    realm: Option<&str>,
    format: OutputFormat,
) -> CliResult<()> {
    let config = config.with_overrides(server, realm);

    match cmd {
        UsersCommand::List { search, max } => list_users(&config, search, max, format).await,
    }
}

/// Lists users in the target realm, acquiring a token the same way the
/// migration run does.
async fn list_users(
    config: &MigrateConfig,
    search: Option<String>,
    max: Option<u32>,
    format: OutputFormat,
) -> CliResult<()> {
    let http = http_client()?;
    let session = AdminSession::new(
        http.clone(),
        &config.keycloak_url,
        &config.admin_realm,
        &config.admin_client_id,
        &config.admin_user,
        &config.admin_password,
    );
    let token = session.acquire_token().await?;

    let admin = AdminApiClient::new(http, &config.keycloak_url, &config.realm, token);
    let users = admin.list_users(search.as_deref(), max).await?;

    let rows: Vec<UserRow> = users.into_iter().map(UserRow::from).collect();
    output(&rows, format)
}
