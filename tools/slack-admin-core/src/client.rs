//! Slack Web API client.
//!
//! One bearer-authenticated reqwest client per tool run. Every call decodes
//! the JSON envelope and maps `ok: false` to [`Error::Api`]. HTTP 429 is
//! retried after the `Retry-After` delay, doubling a fallback delay when the
//! header is absent, up to a bounded number of attempts.

use std::time::Duration;

use reqwest::{Method, StatusCode, header};
use serde_json::Value;

use crate::error::Error;

const DEFAULT_BASE_URL: &str = "https://slack.com/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 5;
const MAX_BACKOFF: Duration = Duration::from_secs(600);

/// Request body variants for Web API calls.
#[derive(Clone, Copy)]
enum Body<'a> {
    None,
    Form(&'a [(&'a str, String)]),
    Json(&'a Value),
}

/// Bearer-authenticated client for the Slack Web API.
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl SlackClient {
    /// Creates a client with the default base URL and a 30 second timeout.
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

    /// Overrides the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), method)
    }

    /// Calls a Web API method with query parameters.
    pub async fn get(&self, method: &str, params: &[(&str, String)]) -> Result<Value, Error> {
        self.call(Method::GET, method, params, Body::None).await
    }

    /// Calls a Web API method with a form-encoded body.
    pub async fn post_form(&self, method: &str, fields: &[(&str, String)]) -> Result<Value, Error> {
        self.call(Method::POST, method, &[], Body::Form(fields)).await
    }

    /// Calls a Web API method with a JSON body.
    pub async fn post_json(&self, method: &str, body: &Value) -> Result<Value, Error> {
        self.call(Method::POST, method, &[], Body::Json(body)).await
    }

    /// Uploads a file with `files.upload` as a multipart form.
    pub async fn upload_file(
        &self,
        channel: &str,
        filename: &str,
        bytes: Vec<u8>,
        title: &str,
    ) -> Result<Value, Error> {
        let method = "files.upload";
        let mut fallback = Duration::from_secs(1);

        for _attempt in 1..=MAX_ATTEMPTS {
            let part = reqwest::multipart::Part::bytes(bytes.clone())
                .file_name(filename.to_string());
            let form = reqwest::multipart::Form::new()
                .part("file", part)
                .text("filename", filename.to_string())
                .text("channels", channel.to_string())
                .text("title", title.to_string());

            let response = self
                .http
                .post(self.url(method))
                .bearer_auth(&self.token)
                .multipart(form)
                .send()
                .await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                fallback = self.backoff(method, response.headers(), fallback).await;
                continue;
            }

            return Self::decode(method, response).await;
        }

        Err(Error::RateLimited {
            method: method.to_string(),
        })
    }

    /// Fetches pages of `method`, accumulating the array under `key` until
    /// no continuation cursor is returned.
    pub async fn paginate(
        &self,
        method: &str,
        params: &[(&str, String)],
        key: &str,
    ) -> Result<Vec<Value>, Error> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = params.to_vec();
            if let Some(ref c) = cursor {
                query.push(("cursor", c.clone()));
            }

            let payload = self.get(method, &query).await?;
            if let Some(items) = payload.get(key).and_then(Value::as_array) {
                records.extend(items.iter().cloned());
            }
            tracing::debug!(method, total = records.len(), "fetched page");

            cursor = next_cursor(&payload);
            if cursor.is_none() {
                break;
            }
        }

        Ok(records)
    }

    async fn call(
        &self,
        http_method: Method,
        method: &str,
        query: &[(&str, String)],
        body: Body<'_>,
    ) -> Result<Value, Error> {
        let mut fallback = Duration::from_secs(1);

        for _attempt in 1..=MAX_ATTEMPTS {
            let mut request = self
                .http
                .request(http_method.clone(), self.url(method))
                .bearer_auth(&self.token);
            if !query.is_empty() {
                request = request.query(query);
            }
            request = match body {
                Body::None => request,
                Body::Form(fields) => request.form(fields),
                Body::Json(value) => request.json(value),
            };

            let response = request.send().await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                fallback = self.backoff(method, response.headers(), fallback).await;
                continue;
            }

            return Self::decode(method, response).await;
        }

        Err(Error::RateLimited {
            method: method.to_string(),
        })
    }

    async fn backoff(
        &self,
        method: &str,
        headers: &header::HeaderMap,
        fallback: Duration,
    ) -> Duration {
        let wait = retry_after(headers).unwrap_or(fallback);
        tracing::warn!(method, wait_secs = wait.as_secs(), "rate limited, backing off");
        tokio::time::sleep(wait).await;
        (fallback * 2).min(MAX_BACKOFF)
    }

    async fn decode(method: &str, response: reqwest::Response) -> Result<Value, Error> {
        let response = response.error_for_status()?;
        let payload: Value = response.json().await?;

        if payload.get("ok").and_then(Value::as_bool) == Some(false) {
            let code = payload
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown_error")
                .to_string();
            return Err(Error::Api {
                method: method.to_string(),
                code,
            });
        }

        Ok(payload)
    }
}

/// Extracts `response_metadata.next_cursor`, treating an empty string as
/// no further pages.
pub fn next_cursor(payload: &Value) -> Option<String> {
    payload
        .pointer("/response_metadata/next_cursor")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_string)
}

/// Parses the `Retry-After` header as whole seconds.
fn retry_after(headers: &header::HeaderMap) -> Option<Duration> {
    headers
        .get(header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn next_cursor_returns_continuation() {
        let payload = json!({
            "ok": true,
            "users": [],
            "response_metadata": {"next_cursor": "dXNlcjpVMDYx"}
        });
        assert_eq!(next_cursor(&payload).as_deref(), Some("dXNlcjpVMDYx"));
    }

    #[test]
    fn next_cursor_treats_empty_as_done() {
        let payload = json!({
            "ok": true,
            "response_metadata": {"next_cursor": ""}
        });
        assert_eq!(next_cursor(&payload), None);
    }

    #[test]
    fn next_cursor_handles_missing_metadata() {
        let payload = json!({"ok": true, "users": []});
        assert_eq!(next_cursor(&payload), None);
    }

    #[test]
    fn retry_after_parses_seconds() {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::RETRY_AFTER, header::HeaderValue::from_static("30"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(30)));
    }

    #[test]
    fn retry_after_ignores_garbage() {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::RETRY_AFTER,
            header::HeaderValue::from_static("soon"),
        );
        assert_eq!(retry_after(&headers), None);
    }
}
