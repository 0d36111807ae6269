//! Legacy identity store records.

use serde::{Deserialize, Serialize};

/// A user record as exposed by the legacy store's listing endpoint.
///
/// Records are the immutable source of truth for one migration run:
/// produced once by the legacy source, consumed read-only by the
/// reconciliation engine, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyUser {
    /// Unique username; the migration key.
    pub username: String,

    /// Full display name, split into first/last names on migration.
    #[serde(default)]
    pub display_name: String,

    /// Email address.
    pub email: String,

    /// Legacy role names, in store order.
    #[serde(default)]
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_listing_shape() {
        let json = r#"{
            "username": "analyst-mila",
            "displayName": "Mila Analyst",
            "email": "mila.analyst@example.com",
            "roles": ["analyst", "reporter"]
        }"#;

        let user: LegacyUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "analyst-mila");
        assert_eq!(user.display_name, "Mila Analyst");
        assert_eq!(user.roles, vec!["analyst", "reporter"]);
    }

    #[test]
    fn roles_default_to_empty() {
        let json = r#"{"username": "x", "email": "x@example.com"}"#;

        let user: LegacyUser = serde_json::from_str(json).unwrap();
        assert!(user.roles.is_empty());
        assert!(user.display_name.is_empty());
    }
}
