//! Slack SCIM v1 client.
//!
//! The SCIM surface is plain REST, not the Web API envelope: success is an
//! HTTP 2xx (deactivation answers 204 with an empty body) and failures carry
//! the status plus whatever body Slack returned.

use std::time::Duration;

use serde_json::{Value, json};

use crate::error::Error;

const DEFAULT_BASE_URL: &str = "https://api.slack.com/scim/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer-authenticated client for the Slack SCIM v1 API.
pub struct ScimClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl ScimClient {
    /// Creates a client with the default SCIM base URL.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the SCIM base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn user_url(&self, id: &str) -> String {
        format!("{}/Users/{id}", self.base_url.trim_end_matches('/'))
    }

    /// Fetches a SCIM user record.
    pub async fn get_user(&self, id: &str) -> Result<Value, Error> {
        let response = self
            .http
            .get(self.user_url(id))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Applies a partial update to a SCIM user record.
    pub async fn patch_user(&self, id: &str, body: &Value) -> Result<Value, Error> {
        let response = self
            .http
            .patch(self.user_url(id))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Deactivates a SCIM user record. 204 or an empty body is success.
    pub async fn delete_user(&self, id: &str) -> Result<(), Error> {
        let response = self
            .http
            .delete(self.user_url(id))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Error::Scim {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        })
    }

    async fn decode(response: reqwest::Response) -> Result<Value, Error> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Scim {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }
}

/// PATCH body that reactivates an account.
pub fn activate_payload() -> Value {
    json!({"active": true})
}

/// PATCH body converting an account to an active multi-channel guest while
/// keeping its existing group memberships.
pub fn multi_channel_guest_payload(groups: &Value) -> Value {
    json!({
        "schemas": [
            "urn:scim:schemas:core:1.0",
            "urn:scim:schemas:extension:slack:guest:1.0"
        ],
        "active": true,
        "urn:scim:schemas:extension:slack:guest:1.0": {"type": "multi"},
        "groups": groups,
    })
}

/// PATCH body re-asserting a user's group memberships after a conversion.
pub fn group_reassign_payload(id: &str, groups: &Value) -> Value {
    json!({
        "schemas": ["urn:scim:schemas:core:1.0"],
        "id": id,
        "groups": groups,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn guest_payload_carries_both_schemas_and_groups() {
        let groups = json!([{"value": "S012"}]);
        let payload = multi_channel_guest_payload(&groups);

        let schemas: Vec<&str> = payload["schemas"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(schemas.contains(&"urn:scim:schemas:core:1.0"));
        assert!(schemas.contains(&"urn:scim:schemas:extension:slack:guest:1.0"));
        assert_eq!(
            payload["urn:scim:schemas:extension:slack:guest:1.0"]["type"],
            "multi"
        );
        assert_eq!(payload["active"], true);
        assert_eq!(payload["groups"], groups);
    }

    #[test]
    fn reassign_payload_targets_the_user() {
        let groups = json!([{"value": "S012"}, {"value": "S013"}]);
        let payload = group_reassign_payload("W042", &groups);

        assert_eq!(payload["id"], "W042");
        assert_eq!(payload["groups"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn activate_payload_sets_active() {
        assert_eq!(activate_payload(), json!({"active": true}));
    }
}
