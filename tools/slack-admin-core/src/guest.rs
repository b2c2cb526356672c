//! Guest expiration policy filter.

use crate::types::AdminUser;

/// Flags guest accounts that have no expiration date set.
///
/// A record violates the policy when the account is not deleted, is a guest
/// (restricted or ultra-restricted), its email domain is not on the
/// exclusion list, and its expiration timestamp is absent or zero.
pub struct GuestExpirationPolicy {
    excluded_domains: Vec<String>,
}

impl GuestExpirationPolicy {
    /// Builds a policy from a list of excluded email domains.
    ///
    /// Domains are normalized to lowercase; a leading `@` is tolerated.
    pub fn new(excluded_domains: impl IntoIterator<Item = String>) -> Self {
        let excluded_domains = excluded_domains
            .into_iter()
            .map(|domain| domain.trim().trim_start_matches('@').to_ascii_lowercase())
            .filter(|domain| !domain.is_empty())
            .collect();
        Self { excluded_domains }
    }

    fn domain_excluded(&self, email: &str) -> bool {
        match email.rsplit_once('@') {
            Some((_, domain)) => {
                let domain = domain.to_ascii_lowercase();
                self.excluded_domains.iter().any(|d| *d == domain)
            }
            None => false,
        }
    }

    /// Whether this user should appear in the missing-expiration report.
    pub fn violates(&self, user: &AdminUser) -> bool {
        if user.deleted || !user.is_guest() {
            return false;
        }
        if let Some(email) = &user.email {
            if self.domain_excluded(email) {
                return false;
            }
        }
        user.expiration_ts == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user(value: serde_json::Value) -> AdminUser {
        serde_json::from_value(value).unwrap()
    }

    fn policy(domains: &[&str]) -> GuestExpirationPolicy {
        GuestExpirationPolicy::new(domains.iter().map(|d| d.to_string()))
    }

    #[test]
    fn guest_without_expiration_violates() {
        let guest = user(json!({
            "id": "W1", "email": "g@partner.io", "is_restricted": true
        }));
        assert!(policy(&[]).violates(&guest));
    }

    #[test]
    fn guest_with_expiration_passes() {
        let guest = user(json!({
            "id": "W1", "email": "g@partner.io", "is_restricted": true,
            "expiration_ts": 1_735_689_600
        }));
        assert!(!policy(&[]).violates(&guest));
    }

    #[test]
    fn deleted_guest_never_violates() {
        let guest = user(json!({
            "id": "W1", "email": "g@partner.io", "is_ultra_restricted": true,
            "deleted": true
        }));
        assert!(!policy(&[]).violates(&guest));
    }

    #[test]
    fn full_member_never_violates() {
        let member = user(json!({
            "id": "W1", "email": "m@corp.com"
        }));
        assert!(!policy(&[]).violates(&member));
    }

    #[test]
    fn excluded_domain_is_case_insensitive() {
        let guest = user(json!({
            "id": "W1", "email": "g@Partner.IO", "is_restricted": true
        }));
        assert!(!policy(&["partner.io"]).violates(&guest));
    }

    #[test]
    fn exclusion_list_accepts_leading_at() {
        let guest = user(json!({
            "id": "W1", "email": "g@partner.io", "is_restricted": true
        }));
        assert!(!policy(&["@partner.io"]).violates(&guest));
    }

    #[test]
    fn guest_without_email_is_not_domain_excluded() {
        let guest = user(json!({
            "id": "W1", "email": null, "is_restricted": true
        }));
        assert!(policy(&["partner.io"]).violates(&guest));
    }

    #[test]
    fn domain_match_uses_part_after_final_at() {
        let guest = user(json!({
            "id": "W1", "email": "odd@name@partner.io", "is_restricted": true
        }));
        assert!(!policy(&["partner.io"]).violates(&guest));
    }
}
