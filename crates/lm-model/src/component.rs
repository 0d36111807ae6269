//! Realm component representation and the guard's provider snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Config key holding the provider's enabled flag.
const ENABLED_KEY: &str = "enabled";

/// A realm component as returned by the admin components endpoint.
///
/// The migration only ever touches federation provider components, and
/// only the `enabled` config entry is mutated; everything else is carried
/// through untouched on writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRepresentation {
    /// Component identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Provider implementation id.
    pub provider_id: String,

    /// Provider SPI type.
    pub provider_type: String,

    /// Parent component or realm id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Component configuration (multi-valued).
    #[serde(default)]
    pub config: HashMap<String, Vec<String>>,
}

impl ComponentRepresentation {
    /// Reads the `enabled` config value, defaulting to `"true"` when the
    /// key is absent or empty.
    #[must_use]
    pub fn enabled_value(&self) -> &str {
        self.config
            .get(ENABLED_KEY)
            .and_then(|values| values.first())
            .map_or("true", String::as_str)
    }

    /// Overwrites the `enabled` config value.
    pub fn set_enabled_value(&mut self, value: impl Into<String>) {
        self.config
            .insert(ENABLED_KEY.to_string(), vec![value.into()]);
    }
}

/// Pre-change copy of the guarded component.
///
/// Created at most once per run by the guard's disable step and consumed
/// exactly once by restore; never persisted beyond the process.
#[derive(Debug, Clone)]
pub struct ProviderSnapshot {
    /// The component as read before any mutation.
    pub component: ComponentRepresentation,

    /// The `enabled` value in effect before the guard ran.
    pub original_enabled: String,

    /// Whether disable actually wrote a change that restore must undo.
    pub changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component() -> ComponentRepresentation {
        ComponentRepresentation {
            id: "legacy-user-storage".to_string(),
            name: "legacy".to_string(),
            provider_id: "legacy-user-storage".to_string(),
            provider_type: "org.keycloak.storage.UserStorageProvider".to_string(),
            parent_id: Some("research".to_string()),
            config: HashMap::new(),
        }
    }

    #[test]
    fn enabled_defaults_to_true_when_absent() {
        assert_eq!(component().enabled_value(), "true");
    }

    #[test]
    fn set_enabled_round_trips() {
        let mut c = component();
        c.set_enabled_value("false");
        assert_eq!(c.enabled_value(), "false");

        c.set_enabled_value("true");
        assert_eq!(c.enabled_value(), "true");
    }

    #[test]
    fn empty_enabled_list_reads_as_true() {
        let mut c = component();
        c.config.insert("enabled".to_string(), Vec::new());
        assert_eq!(c.enabled_value(), "true");
    }
}
