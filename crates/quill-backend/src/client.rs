// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the document backend.
//!
//! Provides [`BackendClient`] which handles URL construction,
//! authentication, timeouts, error decoding, and transient error retry.

use std::time::Duration;

use quill_config::model::BackendConfig;
use quill_core::error::QuillError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use crate::types::ErrorBody;

const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Whether a request may be resent after a transient status.
///
/// Calls that create something on the backend (chat rounds, new
/// conversations, uploads) are sent exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retry {
    /// Resend on 429, 500, 503 or 529, up to `max_retries` times.
    Transient,
    /// One attempt only.
    Never,
}

/// HTTP client for backend communication.
///
/// Requests sent with [`Retry::Transient`] are retried on transient errors
/// (429, 500, 503, 529) up to `max_retries` times.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl BackendClient {
    /// Creates a client from the `[backend]` configuration section.
    pub fn new(config: &BackendConfig) -> Result<Self, QuillError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = config.auth_token.as_deref().filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                QuillError::Config(format!("invalid auth token header value: {e}"))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QuillError::network(format!("failed to build HTTP client: {e}"), e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Overrides the pause between retries.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of `path` (e.g. `"chat/"`) under the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Sends the request built by `build` and returns the successful response.
    ///
    /// `build` is called once per attempt, since multipart bodies cannot be
    /// cloned. Non-2xx statuses become [`QuillError::Server`] carrying the
    /// backend's `{"error": ...}` text when present.
    pub async fn execute<F>(
        &self,
        operation: &str,
        retry: Retry,
        build: F,
    ) -> Result<Response, QuillError>
    where
        F: Fn() -> Result<RequestBuilder, QuillError>,
    {
        let max_retries = match retry {
            Retry::Transient => self.max_retries,
            Retry::Never => 0,
        };
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                warn!(operation, attempt, "retrying request after transient error");
                tokio::time::sleep(self.retry_delay).await;
            }

            let response = build()?.send().await.map_err(|e| {
                warn!(operation, error = %e, "request failed");
                QuillError::network(format!("HTTP request failed: {e}"), e)
            })?;

            let status = response.status();
            debug!(operation, status = %status, attempt, "response received");

            if status.is_success() {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < max_retries {
                warn!(operation, status = %status, body = %body, "transient error, will retry");
                attempt += 1;
                continue;
            }

            warn!(operation, status = %status, body = %body, "backend returned an error");
            return Err(server_error(status, &body));
        }
    }

    /// Like [`execute`](Self::execute) and decodes the JSON body.
    pub async fn execute_json<T, F>(
        &self,
        operation: &str,
        retry: Retry,
        build: F,
    ) -> Result<T, QuillError>
    where
        T: serde::de::DeserializeOwned,
        F: Fn() -> Result<RequestBuilder, QuillError>,
    {
        let response = self.execute(operation, retry, build).await?;
        let body = response
            .text()
            .await
            .map_err(|e| QuillError::network(format!("failed to read response body: {e}"), e))?;
        serde_json::from_str(&body).map_err(|e| QuillError::Server {
            status: StatusCode::OK.as_u16(),
            message: format!("failed to parse {operation} response: {e}"),
        })
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}

/// Decodes `{"error": "..."}`; other bodies leave the message empty so the
/// user sees the generic failure text.
fn server_error(status: StatusCode, body: &str) -> QuillError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_default();
    QuillError::Server {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> BackendClient {
        let config = BackendConfig {
            base_url: format!("{base_url}/api/"),
            auth_token: Some("secret".into()),
            ..BackendConfig::default()
        };
        BackendClient::new(&config)
            .unwrap()
            .with_retry_delay(Duration::from_millis(10))
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let client = BackendClient::new(&BackendConfig::default()).unwrap();
        assert_eq!(client.url("chat/"), "http://localhost:8000/api/chat/");
        assert_eq!(client.url("/conversations/1/"), "http://localhost:8000/api/conversations/1/");
    }

    #[test]
    fn invalid_token_is_a_config_error() {
        let config = BackendConfig {
            auth_token: Some("bad\ntoken".into()),
            ..BackendConfig::default()
        };
        assert!(matches!(
            BackendClient::new(&config),
            Err(QuillError::Config(_))
        ));
    }

    #[tokio::test]
    async fn sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/conversations/"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .execute("list", Retry::Transient, || Ok(client.get("conversations/")))
            .await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn retries_once_on_503_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/conversations/"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/conversations/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let rows: Vec<serde_json::Value> = client
            .execute_json("list", Retry::Transient, || Ok(client.get("conversations/")))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn exhausted_retries_surface_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/conversations/"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"error": "database offline"})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .execute("list", Retry::Transient, || Ok(client.get("conversations/")))
            .await
            .unwrap_err();
        match err {
            QuillError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database offline");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn single_attempt_requests_are_not_resent_on_500() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "boom"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .execute("chat", Retry::Never, || Ok(client.post("chat/")))
            .await
            .unwrap_err();
        assert_eq!(err.user_facing_message(), "boom");
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/conversations/"))
            .respond_with(ResponseTemplate::new(400).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .execute("list", Retry::Transient, || Ok(client.get("conversations/")))
            .await
            .unwrap_err();
        assert!(matches!(err, QuillError::Server { status: 400, ref message } if message.is_empty()));
    }

    #[tokio::test]
    async fn connection_refused_is_a_network_error() {
        let client = test_client("http://127.0.0.1:9");
        let err = client
            .execute("list", Retry::Transient, || Ok(client.get("conversations/")))
            .await
            .unwrap_err();
        assert!(matches!(err, QuillError::Network { .. }));
    }
}
