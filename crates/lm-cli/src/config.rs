//! CLI configuration.
//!
//! Values merge in precedence order: command-line flags (handled by clap,
//! including their env fallbacks), then admin-credential environment
//! variables, then the config file, then built-in defaults matching the
//! original deployment.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Tool configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct MigrateConfig {
    /// Identity server base URL.
    #[serde(default = "default_keycloak_url")]
    pub keycloak_url: String,

    /// Realm receiving the migrated users.
    #[serde(default = "default_realm")]
    pub realm: String,

    /// Realm the admin account authenticates against.
    #[serde(default = "default_admin_realm")]
    pub admin_realm: String,

    /// Admin username for the password grant.
    #[serde(default = "default_admin")]
    pub admin_user: String,

    /// Admin password for the password grant.
    #[serde(default = "default_admin")]
    pub admin_password: String,

    /// Client id used for the password grant.
    #[serde(default = "default_admin_client_id")]
    pub admin_client_id: String,

    /// Legacy store base URL.
    #[serde(default = "default_legacy_url")]
    pub legacy_url: String,

    /// Legacy listing endpoint path.
    #[serde(default = "default_legacy_endpoint")]
    pub legacy_endpoint: String,

    /// Federation provider component id to guard.
    #[serde(default = "default_provider_id")]
    pub provider_id: String,
}

fn default_keycloak_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_realm() -> String {
    "research".to_string()
}

fn default_admin_realm() -> String {
    "master".to_string()
}

fn default_admin() -> String {
    "admin".to_string()
}

fn default_admin_client_id() -> String {
    "admin-cli".to_string()
}

fn default_legacy_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_legacy_endpoint() -> String {
    "/users".to_string()
}

fn default_provider_id() -> String {
    "legacy-user-storage".to_string()
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            keycloak_url: default_keycloak_url(),
            realm: default_realm(),
            admin_realm: default_admin_realm(),
            admin_user: default_admin(),
            admin_password: default_admin(),
            admin_client_id: default_admin_client_id(),
            legacy_url: default_legacy_url(),
            legacy_endpoint: default_legacy_endpoint(),
            provider_id: default_provider_id(),
        }
    }
}

impl fmt::Debug for MigrateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The admin password never reaches logs.
        f.debug_struct("MigrateConfig")
            .field("keycloak_url", &self.keycloak_url)
            .field("realm", &self.realm)
            .field("admin_realm", &self.admin_realm)
            .field("admin_user", &self.admin_user)
            .field("admin_client_id", &self.admin_client_id)
            .field("legacy_url", &self.legacy_url)
            .field("legacy_endpoint", &self.legacy_endpoint)
            .field("provider_id", &self.provider_id)
            .finish_non_exhaustive()
    }
}

impl MigrateConfig {
    /// Loads configuration from the config file (if present) and applies
    /// environment overrides.
    pub fn load() -> crate::CliResult<Self> {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)?;
                Self::parse(&content)?
            }
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Parses a TOML config document; absent keys fall back to defaults.
    pub fn parse(content: &str) -> crate::CliResult<Self> {
        toml::from_str(content)
            .map_err(|e| crate::CliError::Config(format!("failed to parse config: {e}")))
    }

    /// Gets the configuration file path.
    pub fn config_path() -> crate::CliResult<PathBuf> {
        let home = dirs_next::home_dir().ok_or_else(|| {
            crate::CliError::Config("could not determine home directory".to_string())
        })?;
        Ok(home.join(".legacy-migrate").join("lm.toml"))
    }

    /// Applies admin-credential environment overrides. Server, realm, and
    /// legacy-store settings are handled by clap's env fallbacks instead.
    fn apply_env(&mut self) {
        for (var, field) in [
            ("KEYCLOAK_ADMIN_REALM", &mut self.admin_realm),
            ("KEYCLOAK_ADMIN_USER", &mut self.admin_user),
            ("KEYCLOAK_ADMIN_PASSWORD", &mut self.admin_password),
            ("KEYCLOAK_ADMIN_CLIENT_ID", &mut self.admin_client_id),
        ] {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    *field = value;
                }
            }
        }
    }

    /// Returns a copy with CLI overrides applied.
    #[must_use]
    pub fn with_overrides(&self, server: Option<&str>, realm: Option<&str>) -> Self {
        let mut config = self.clone();
        if let Some(server) = server {
            config.keycloak_url = server.to_string();
        }
        if let Some(realm) = realm {
            config.realm = realm.to_string();
        }
        config
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// Quiet (minimal output).
    Quiet,
}
