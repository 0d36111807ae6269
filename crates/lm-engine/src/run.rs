//! Run orchestration: token, guard, reconcile, restore.

use chrono::Utc;
use lm_client::{AdminApiClient, AdminSession, LegacySource};
use lm_model::RunTally;
use tracing::{debug, info, warn};

use crate::error::{MigrateError, MigrateResult};
use crate::guard::FederationGuard;
use crate::reconcile::ReconciliationEngine;

/// Lifecycle states of a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing acquired yet.
    Init,
    /// Admin token in hand.
    TokenAcquired,
    /// Guard attempt completed; restore is now mandatory.
    ProviderGuarded,
    /// Reconciliation loop in progress.
    Reconciling,
    /// Restoring provider state.
    Restoring,
    /// Run finished (possibly with failures recorded on the report).
    Done,
    /// Token or source acquisition failed before any mutation.
    Aborted,
}

/// Final report of one migration run.
#[derive(Debug)]
pub struct RunReport {
    /// Terminal state of the run.
    pub state: RunState,

    /// Per-record outcome counts; all zero when the run aborted early.
    pub tally: RunTally,

    /// Fatal error that stopped the run, if any.
    pub fatal: Option<MigrateError>,

    /// Whether restoring the provider state failed. Escalates the exit
    /// signal without masking a prior failure.
    pub restore_failed: bool,
}

impl RunReport {
    /// The run's exit contract: failure iff the run aborted, any record
    /// failed, or the provider restore failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.fatal.is_some() || self.restore_failed || self.tally.is_failure()
    }

    fn aborted(fatal: MigrateError) -> Self {
        let mut tally = RunTally::new(Utc::now());
        tally.complete();
        Self {
            state: RunState::Aborted,
            tally,
            fatal: Some(fatal),
            restore_failed: false,
        }
    }
}

/// Orchestrates one migration run.
///
/// Sequence: acquire token, disable the federation provider, fetch the
/// legacy listing, reconcile record by record, and restore the provider.
/// Restoration runs on every exit path once a guard attempt was made,
/// including when the source fetch or the guard itself failed.
pub struct MigrationRun {
    http: reqwest::Client,
    session: AdminSession,
    source: LegacySource,
    base_url: String,
    realm: String,
    provider_id: String,
}

impl MigrationRun {
    /// Bundles everything a run needs before execution.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        session: AdminSession,
        source: LegacySource,
        base_url: impl Into<String>,
        realm: impl Into<String>,
        provider_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            session,
            source,
            base_url: base_url.into(),
            realm: realm.into(),
            provider_id: provider_id.into(),
        }
    }

    /// Executes the run to completion and reports the outcome.
    ///
    /// Never returns `Err`: fatal errors are carried on the report so the
    /// caller has a single place to derive the exit signal from.
    pub async fn execute(&self) -> RunReport {
        debug!(state = ?RunState::Init, realm = %self.realm, "starting migration run");

        let token = match self.session.acquire_token().await {
            Ok(token) => token,
            Err(err) => return RunReport::aborted(err.into()),
        };
        debug!(state = ?RunState::TokenAcquired, "admin token acquired");

        let admin = AdminApiClient::new(self.http.clone(), &self.base_url, &self.realm, token);
        let mut guard = FederationGuard::new(&admin, &self.provider_id);

        // From the first guard attempt on, restore is the run's mandatory
        // cleanup step; the reconciliation result is captured, never
        // propagated past it.
        let (snapshot, loop_result) = match guard.disable().await {
            Ok(snapshot) => {
                debug!(state = ?RunState::ProviderGuarded, provider_disabled = guard.provider_disabled(), "guard engaged");
                let loop_result = self
                    .reconcile_phase(&admin, guard.provider_disabled())
                    .await;
                (snapshot, loop_result)
            }
            Err(err) => (None, Err(err.into())),
        };

        debug!(state = ?RunState::Restoring, "restoring provider state");
        let restore_failed = match guard.restore(snapshot.as_ref()).await {
            Ok(()) => false,
            Err(err) => {
                warn!(%err, "failed to restore provider state; provider may be left disabled");
                true
            }
        };

        match loop_result {
            Ok(tally) => {
                info!(state = ?RunState::Done, summary = %tally.summary(), "migration run finished");
                RunReport {
                    state: RunState::Done,
                    tally,
                    fatal: None,
                    restore_failed,
                }
            }
            Err(fatal) => {
                let mut tally = RunTally::new(Utc::now());
                tally.complete();
                RunReport {
                    state: RunState::Done,
                    tally,
                    fatal: Some(fatal),
                    restore_failed,
                }
            }
        }
    }

    async fn reconcile_phase(
        &self,
        admin: &AdminApiClient,
        provider_disabled: bool,
    ) -> MigrateResult<RunTally> {
        let records = self.source.fetch_all().await?;
        info!(state = ?RunState::Reconciling, count = records.len(), "reconciling legacy users");

        let engine = ReconciliationEngine::new(admin, &self.provider_id, provider_disabled);
        Ok(engine.reconcile(&records).await)
    }
}
