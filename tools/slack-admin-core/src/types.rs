//! Record types for the Slack API responses the tools consume.

use serde::Deserialize;

/// A user record from `admin.users.list`.
///
/// Fields Slack omits for some account types default to `false`/`0` so a
/// partial record still deserializes.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub is_primary_owner: bool,
    #[serde(default)]
    pub is_restricted: bool,
    #[serde(default)]
    pub is_ultra_restricted: bool,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub deleted: bool,
    /// Epoch seconds at which guest access auto-revokes; 0 means no
    /// expiration is set.
    #[serde(default)]
    pub expiration_ts: i64,
}

impl AdminUser {
    /// Whether the account is a guest (restricted or ultra-restricted).
    pub fn is_guest(&self) -> bool {
        self.is_restricted || self.is_ultra_restricted
    }

    /// Human label for the guest flavor.
    pub fn guest_kind(&self) -> &'static str {
        if self.is_ultra_restricted {
            "single-channel"
        } else {
            "multi-channel"
        }
    }
}

/// A channel record from `conversations.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub num_members: Option<u64>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_private: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn admin_user_defaults_missing_fields() {
        let user: AdminUser = serde_json::from_value(json!({
            "id": "W012AB3CD",
            "email": "guest@example.com",
            "is_restricted": true
        }))
        .unwrap();

        assert!(user.is_guest());
        assert!(!user.deleted);
        assert_eq!(user.expiration_ts, 0);
        assert_eq!(user.guest_kind(), "multi-channel");
    }

    #[test]
    fn ultra_restricted_is_single_channel() {
        let user: AdminUser = serde_json::from_value(json!({
            "id": "W012AB3CD",
            "email": null,
            "is_ultra_restricted": true
        }))
        .unwrap();

        assert_eq!(user.guest_kind(), "single-channel");
        assert!(user.email.is_none());
    }

    #[test]
    fn channel_record_parses_without_member_count() {
        let channel: Channel = serde_json::from_value(json!({
            "id": "C024BE91L",
            "name": "ops-review"
        }))
        .unwrap();

        assert_eq!(channel.num_members, None);
        assert!(!channel.is_archived);
    }
}
