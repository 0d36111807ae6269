//! Migration command.

use lm_client::{AdminSession, LegacySource};
use lm_engine::{MigrationRun, RunState};

use crate::cli::MigrateArgs;
use crate::output::{error, info, success};
use crate::{CliError, CliResult, MigrateConfig};

use super::http_client;

/// Runs the guarded legacy-user migration end to end.
///
/// Per-record outcome lines are emitted through tracing by the engine;
/// this command prints the final tally and maps the run's exit contract to
/// an error the caller turns into a non-zero exit code.
pub async fn run_migrate(
    args: MigrateArgs,
    config: &MigrateConfig,
    server: Option<&str>,
    realm: Option<&str>,
) -> CliResult<()> {
    let mut config = config.with_overrides(server, realm);
    if let Some(legacy_url) = args.legacy_url {
        config.legacy_url = legacy_url;
    }
    if let Some(legacy_endpoint) = args.legacy_endpoint {
        config.legacy_endpoint = legacy_endpoint;
    }
    if let Some(provider_id) = args.provider_id {
        config.provider_id = provider_id;
    }

    let http = http_client()?;
    let session = AdminSession::new(
        http.clone(),
        &config.keycloak_url,
        &config.admin_realm,
        &config.admin_client_id,
        &config.admin_user,
        &config.admin_password,
    );
    let source = LegacySource::new(http.clone(), &config.legacy_url, &config.legacy_endpoint);
    let run = MigrationRun::new(
        http,
        session,
        source,
        &config.keycloak_url,
        &config.realm,
        &config.provider_id,
    );

    info(&format!(
        "Migrating legacy users from {}{} into realm '{}'...",
        config.legacy_url, config.legacy_endpoint, config.realm
    ));

    let report = run.execute().await;

    println!();
    let tally = &report.tally;
    info(&format!("Created: {}", tally.created));
    info(&format!("Updated: {}", tally.updated));
    info(&format!("Skipped: {}", tally.skipped));
    info(&format!("Failed : {}", tally.failed));

    if let Some(fatal) = &report.fatal {
        error(&format!("Aborting migration: {fatal}"));
    }
    if report.restore_failed {
        error("Provider restore failed; the federation provider may be left disabled");
    }

    if report.is_failure() {
        return Err(CliError::MigrationFailed);
    }

    if report.state == RunState::Done {
        success(&format!("Migration complete: {}", tally.summary()));
    }
    Ok(())
}
