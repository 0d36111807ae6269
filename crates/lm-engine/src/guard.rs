//! Federation provider guard.
//!
//! Disables the configured federation provider component for the duration
//! of a run and restores its previous state afterwards, so migrated
//! accounts are not re-shadowed by live legacy lookups mid-batch.

use lm_client::{AdminApiClient, ClientResult};
use lm_model::ProviderSnapshot;
use tracing::debug;

/// Guards the named provider component around the reconciliation batch.
///
/// The disabled state is an explicit field threaded into the
/// reconciliation engine, not ambient state. At most one snapshot is live
/// per run; [`FederationGuard::restore`] consumes it exactly once.
pub struct FederationGuard<'a> {
    admin: &'a AdminApiClient,
    component_id: String,
    provider_disabled: bool,
}

impl<'a> FederationGuard<'a> {
    /// Creates a guard for the given component id.
    #[must_use]
    pub fn new(admin: &'a AdminApiClient, component_id: impl Into<String>) -> Self {
        Self {
            admin,
            component_id: component_id.into(),
            provider_disabled: false,
        }
    }

    /// Whether the provider is effectively disabled, as far as this run
    /// can tell. True after [`FederationGuard::disable`] for both a fresh
    /// disable and a pre-existing disabled state.
    #[must_use]
    pub const fn provider_disabled(&self) -> bool {
        self.provider_disabled
    }

    /// Disables the provider component, returning the snapshot restore
    /// needs.
    ///
    /// A missing component (404) returns `None` and the run proceeds
    /// unguarded. An already-disabled component is snapshotted with
    /// `changed = false` and no write is issued.
    pub async fn disable(&mut self) -> ClientResult<Option<ProviderSnapshot>> {
        let Some(component) = self.admin.get_component(&self.component_id).await? else {
            debug!(
                component_id = %self.component_id,
                "provider component not found, migrating unguarded"
            );
            return Ok(None);
        };

        let original_enabled = component.enabled_value().to_string();
        if original_enabled == "false" {
            debug!(component_id = %self.component_id, "provider already disabled");
            self.provider_disabled = true;
            return Ok(Some(ProviderSnapshot {
                component,
                original_enabled,
                changed: false,
            }));
        }

        let mut disabled = component.clone();
        disabled.set_enabled_value("false");
        self.admin
            .update_component(&self.component_id, &disabled)
            .await?;
        debug!(
            component_id = %self.component_id,
            %original_enabled,
            "provider disabled for migration"
        );

        self.provider_disabled = true;
        Ok(Some(ProviderSnapshot {
            component,
            original_enabled,
            changed: true,
        }))
    }

    /// Restores the provider to its pre-run state.
    ///
    /// Trusts the snapshot and never re-reads current state: a
    /// `changed = false` snapshot issues no write at all, and a restore
    /// writes back exactly the value read before disable.
    pub async fn restore(&mut self, snapshot: Option<&ProviderSnapshot>) -> ClientResult<()> {
        let Some(snapshot) = snapshot else {
            self.provider_disabled = false;
            return Ok(());
        };

        if snapshot.changed {
            let mut component = snapshot.component.clone();
            component.set_enabled_value(snapshot.original_enabled.clone());
            self.admin
                .update_component(&component.id, &component)
                .await?;
            debug!(
                component_id = %component.id,
                enabled = %snapshot.original_enabled,
                "provider state restored"
            );
        }

        self.provider_disabled = snapshot.original_enabled == "false";
        Ok(())
    }
}
