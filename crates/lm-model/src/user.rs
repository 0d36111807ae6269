//! Realm admin API user representation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A user as sent to and read from the realm admin users endpoint.
///
/// The same shape doubles as the create/update payload and the record
/// returned by username queries. Unknown server fields are ignored on
/// read; name fields serialize as explicit `null` when absent so an
/// update never overwrites a displayed name with an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRepresentation {
    /// Server-assigned identifier; absent on create payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Unique username within the realm.
    pub username: String,

    /// Email address.
    pub email: Option<String>,

    /// First name.
    pub first_name: Option<String>,

    /// Last name.
    pub last_name: Option<String>,

    /// Whether the account is enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Whether the email address is verified.
    #[serde(default)]
    pub email_verified: bool,

    /// Link to the user federation provider owning this account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federation_link: Option<String>,

    /// Custom attributes (multi-valued).
    #[serde(default)]
    pub attributes: HashMap<String, Vec<String>>,

    /// Pending required actions.
    #[serde(default)]
    pub required_actions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_with_null_names() {
        let user = UserRepresentation {
            username: "test-user".to_string(),
            email: Some("test.user@example.com".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
            enabled: true,
            email_verified: true,
            federation_link: Some("legacy-user-storage".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "Test");
        assert!(json["lastName"].is_null());
        assert_eq!(json["emailVerified"], true);
        assert_eq!(json["federationLink"], "legacy-user-storage");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn ignores_unknown_server_fields() {
        let json = r#"{
            "id": "5de7",
            "username": "api-reader",
            "enabled": true,
            "createdTimestamp": 1700000000000,
            "totp": false
        }"#;

        let user: UserRepresentation = serde_json::from_str(json).unwrap();
        assert_eq!(user.id.as_deref(), Some("5de7"));
        assert!(user.federation_link.is_none());
    }
}
