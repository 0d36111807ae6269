//! Per-record reconciliation against the target realm.

use std::collections::HashMap;
use std::fmt;

use chrono::Utc;
use lm_client::{AdminApiClient, ClientResult};
use lm_model::{LegacyUser, RunTally, UserRepresentation};
use reqwest::StatusCode;
use tracing::{info, warn};

/// Attribute key carrying the legacy role list on migrated accounts.
const LEGACY_ROLES_ATTRIBUTE: &str = "legacyRoles";

/// Why a conflicting record was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The conflict lookup found no exact username match; resolution would
    /// be guesswork.
    NoExactMatch,

    /// The existing account is federated under a different provider and is
    /// owned by that integration.
    ForeignFederation,

    /// The existing account has no federation link and still resolves
    /// through the live legacy provider.
    ProviderStillLive,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NoExactMatch => "no exact username match",
            Self::ForeignFederation => "federated under a different provider",
            Self::ProviderStillLive => "legacy provider still authoritative",
        };
        f.write_str(reason)
    }
}

/// Outcome of reconciling one legacy record.
#[derive(Debug)]
enum Outcome {
    Created,
    Updated,
    Skipped(SkipReason),
    Failed(String),
}

/// Decides create/update/skip per legacy record and executes the calls.
///
/// Records are processed one at a time, in source order: the 409 conflict
/// resolution reads the existing account and then writes against its id,
/// which needs a consistent pre-state per username.
pub struct ReconciliationEngine<'a> {
    admin: &'a AdminApiClient,
    provider_id: String,
    provider_disabled: bool,
}

impl<'a> ReconciliationEngine<'a> {
    /// Creates an engine for the given provider id and guard state.
    ///
    /// `provider_disabled` is the flag computed by the federation guard,
    /// passed in explicitly.
    #[must_use]
    pub fn new(
        admin: &'a AdminApiClient,
        provider_id: impl Into<String>,
        provider_disabled: bool,
    ) -> Self {
        Self {
            admin,
            provider_id: provider_id.into(),
            provider_disabled,
        }
    }

    /// Runs the full batch and returns the outcome tally.
    ///
    /// Per-record errors are absorbed into the `failed` count; one bad
    /// record never aborts the batch.
    pub async fn reconcile(&self, records: &[LegacyUser]) -> RunTally {
        let mut tally = RunTally::new(Utc::now());

        for record in records {
            let outcome = match self.reconcile_one(record).await {
                Ok(outcome) => outcome,
                Err(err) => Outcome::Failed(err.to_string()),
            };

            match outcome {
                Outcome::Created => {
                    tally.record_created();
                    info!(username = %record.username, outcome = "created", "created user");
                }
                Outcome::Updated => {
                    tally.record_updated();
                    info!(username = %record.username, outcome = "updated", "updated existing user");
                }
                Outcome::Skipped(reason) => {
                    tally.record_skipped();
                    info!(username = %record.username, outcome = "skipped", %reason, "skipped user");
                }
                Outcome::Failed(detail) => {
                    tally.record_failed();
                    warn!(username = %record.username, outcome = "failed", %detail, "failed to migrate user");
                }
            }
        }

        tally.complete();
        tally
    }

    async fn reconcile_one(&self, record: &LegacyUser) -> ClientResult<Outcome> {
        let payload = self.payload(record);

        let status = self.admin.create_user(&payload).await?;
        if status == StatusCode::CREATED {
            Ok(Outcome::Created)
        } else if status == StatusCode::CONFLICT {
            self.resolve_conflict(record, &payload).await
        } else {
            Ok(Outcome::Failed(format!("HTTP {status} while creating user")))
        }
    }

    /// Resolves a 409 by inspecting the existing account's federation
    /// state. Accounts owned by another integration, or still resolving
    /// through the live legacy provider, are never overwritten.
    async fn resolve_conflict(
        &self,
        record: &LegacyUser,
        payload: &UserRepresentation,
    ) -> ClientResult<Outcome> {
        let Some(existing) = self.admin.find_user_by_username(&record.username).await? else {
            return Ok(Outcome::Skipped(SkipReason::NoExactMatch));
        };

        match existing.federation_link.as_deref() {
            Some(link) if link != self.provider_id => {
                return Ok(Outcome::Skipped(SkipReason::ForeignFederation));
            }
            None if !self.provider_disabled => {
                return Ok(Outcome::Skipped(SkipReason::ProviderStillLive));
            }
            _ => {}
        }

        let Some(id) = existing.id.as_deref() else {
            return Ok(Outcome::Failed(
                "conflict lookup returned a record without an id".to_string(),
            ));
        };

        self.admin.update_user(id, payload).await?;
        Ok(Outcome::Updated)
    }

    fn payload(&self, record: &LegacyUser) -> UserRepresentation {
        let (first_name, last_name) = split_display_name(&record.display_name);

        let mut attributes = HashMap::new();
        attributes.insert(LEGACY_ROLES_ATTRIBUTE.to_string(), record.roles.clone());

        UserRepresentation {
            id: None,
            username: record.username.clone(),
            email: Some(record.email.clone()),
            first_name,
            last_name,
            enabled: true,
            email_verified: true,
            federation_link: Some(self.provider_id.clone()),
            attributes,
            required_actions: Vec::new(),
        }
    }
}

/// Splits a display name into first/last name fields.
///
/// First whitespace-separated token becomes the first name, the remainder
/// joined by single spaces becomes the last name. Empty pieces become
/// `None`, never `""`, so updates cannot blank out displayed names.
fn split_display_name(display_name: &str) -> (Option<String>, Option<String>) {
    let mut parts = display_name.split_whitespace();
    let first = parts.next().map(str::to_string);
    let rest: Vec<&str> = parts.collect();
    let last = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };
    (first, last)
}
