//! HTTP client for communicating with the remote API.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;

use vkview_core::api::{ApiError, Envelope};
use vkview_core::config::AppConfig;

/// Outcome of one API call.
///
/// Only transport-layer faults are treated as errors; a non-200 status
/// and an application-level error object are both normal results the
/// caller must check and report.
#[derive(Debug)]
pub enum Reply {
    /// HTTP 200 with a `response` key: the contents of that key
    Payload(Value),
    /// Non-200 status; the body is not consulted
    Http(StatusCode),
    /// HTTP 200 whose body carries a top-level `error` object
    Api(ApiError),
}

/// Blocking HTTP client for the VK-style REST API.
///
/// Each call performs exactly one GET to `req_link + method` with the
/// configured `v` and `access_token` query parameters always attached.
/// There is no retry policy and no request timeout: a hung network call
/// blocks the session, which is an accepted limitation of the tool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    version: String,
    token: String,
    primary_method: String,
}

impl ApiClient {
    /// Create a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("vkview/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.api.req_link.clone(),
            version: config.api.ver.clone(),
            token: config.app.token.clone(),
            primary_method: config.api.main_method.clone(),
        })
    }

    /// The configured primary lookup method.
    pub fn primary_method(&self) -> &str {
        &self.primary_method
    }

    /// Perform one GET request for `method` with `extra` query parameters
    /// on top of the always-present `v` and `access_token`.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-layer faults (network/DNS)
    /// and for 200 bodies that are not valid JSON envelopes. Those are
    /// fatal to the process by design.
    pub fn call(&self, method: &str, extra: &[(&str, String)]) -> Result<Reply> {
        let url = format!("{}{}", self.base_url, method);

        let mut params: Vec<(&str, String)> = vec![
            ("v", self.version.clone()),
            ("access_token", self.token.clone()),
        ];
        params.extend_from_slice(extra);

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .with_context(|| format!("Request to {method} failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(Reply::Http(status));
        }

        let envelope: Envelope = response
            .json()
            .with_context(|| format!("Failed to parse JSON response from {method}"))?;

        if let Some(error) = envelope.error {
            return Ok(Reply::Api(error));
        }

        Ok(Reply::Payload(envelope.response.unwrap_or(Value::Null)))
    }

    /// Resolve identifiers to profile records via the primary method.
    /// Identifiers are comma-joined into the `user_ids` parameter.
    pub fn resolve_users(&self, ids: &[String]) -> Result<Reply> {
        self.call(&self.primary_method, &[("user_ids", ids.join(","))])
    }

    /// Fetch one secondary view for a single resolved user.
    pub fn fetch_option(&self, method: &str, user_id: i64) -> Result<Reply> {
        self.call(method, &[("user_id", user_id.to_string())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{numbered_users, test_config, MockApi};

    #[test]
    fn test_payload_reply_on_success() {
        let mock = MockApi::new();
        mock.seed_users(numbered_users(1..=1));
        let link = mock.start().unwrap();

        let client = ApiClient::new(&test_config(&link)).unwrap();
        let reply = client.resolve_users(&["1".to_string()]).unwrap();

        match reply {
            Reply::Payload(value) => {
                let users: Vec<vkview_core::UserRecord> =
                    serde_json::from_value(value).unwrap();
                assert_eq!(users.len(), 1);
                assert_eq!(users[0].id, 1);
            }
            other => panic!("Expected payload, got {other:?}"),
        }
        assert_eq!(mock.calls("users.get"), 1);
    }

    #[test]
    fn test_version_and_token_always_sent() {
        let mock = MockApi::new();
        let link = mock.start().unwrap();

        let client = ApiClient::new(&test_config(&link)).unwrap();
        client.fetch_option("friends.get", 1).unwrap();

        let params = mock.last_params("friends.get").unwrap();
        assert_eq!(params.get("v").map(String::as_str), Some("5.131"));
        assert_eq!(
            params.get("access_token").map(String::as_str),
            Some("test-token")
        );
        assert_eq!(params.get("user_id").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_non_200_is_a_normal_reply() {
        let mock = MockApi::new();
        mock.fail_http("users.get", 0);
        let link = mock.start().unwrap();

        let client = ApiClient::new(&test_config(&link)).unwrap();
        let reply = client.resolve_users(&["1".to_string()]).unwrap();

        match reply {
            Reply::Http(status) => assert_eq!(status.as_u16(), 500),
            other => panic!("Expected HTTP reply, got {other:?}"),
        }
    }

    #[test]
    fn test_application_error_is_a_normal_reply() {
        let mock = MockApi::new();
        mock.fail_api("users.get", 0, 5, "bad token");
        let link = mock.start().unwrap();

        let client = ApiClient::new(&test_config(&link)).unwrap();
        let reply = client.resolve_users(&["1".to_string()]).unwrap();

        match reply {
            Reply::Api(err) => {
                assert_eq!(err.error_code, 5);
                assert_eq!(err.error_msg, "bad token");
            }
            other => panic!("Expected API error reply, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_fault_is_fatal() {
        // Nothing listens on this port; connection is refused outright
        let client = ApiClient::new(&test_config("http://127.0.0.1:9/method/")).unwrap();
        assert!(client.resolve_users(&["1".to_string()]).is_err());
    }
}
