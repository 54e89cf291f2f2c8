// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible Chat Completions endpoints.
//!
//! Provides [`OpenAiClient`] which handles request construction and
//! bearer authentication. Requests are sent once; failures are not retried.

use std::time::Duration;

use hotflow_core::HotflowError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::types::{ApiErrorResponse, CompletionRequest, CompletionResponse};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Per-request ceiling for chat completions.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for chat completion calls.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `api_key` - bearer token sent with every request
    /// * `base_url` - API root such as `https://api.deepseek.com`; defaults to [`DEFAULT_BASE_URL`]
    pub fn new(api_key: &str, base_url: Option<&str>) -> Result<Self, HotflowError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| HotflowError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HotflowError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let base_url = base_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends a non-streaming request and returns the full response.
    pub async fn chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, HotflowError> {
        let mut req = request.clone();
        req.stream = false;

        let response = self
            .client
            .post(self.endpoint())
            .json(&req)
            .send()
            .await
            .map_err(|e| HotflowError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %req.model, "completion response received");

        let body = response.text().await.map_err(|e| HotflowError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let error_msg = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "chat completion error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(HotflowError::provider(error_msg));
        }

        serde_json::from_str(&body).map_err(|e| HotflowError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".into(),
            temperature: 0.7,
            messages: vec![ApiMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            stream: true,
        }
    }

    fn success_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn chat_completion_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({"stream": false, "temperature": 0.7})))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Hi there!")))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key", Some(&format!("{}/v1", server.uri()))).unwrap();
        let result = client.chat_completion(&test_request()).await.unwrap();
        assert_eq!(result.first_content(), "Hi there!");
        assert_eq!(result.usage.map(|u| u.prompt_tokens), Some(10));
    }

    #[tokio::test]
    async fn client_sends_bearer_and_json_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key", Some(&format!("{}/", server.uri()))).unwrap();
        let result = client.chat_completion(&test_request()).await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn error_envelope_becomes_provider_error_without_retry() {
        let server = MockServer::start().await;
        let error_body = serde_json::json!({
            "error": {"type": "rate_limit_error", "message": "Rate limited"}
        });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key", Some(&server.uri())).unwrap();
        let err = client.chat_completion(&test_request()).await.unwrap_err();
        assert!(matches!(err, HotflowError::Provider { .. }));
        let msg = err.to_string();
        assert!(msg.contains("rate_limit_error") && msg.contains("Rate limited"), "got: {msg}");
    }

    #[tokio::test]
    async fn plain_error_body_is_reported_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key", Some(&server.uri())).unwrap();
        let err = client.chat_completion(&test_request()).await.unwrap_err();
        assert!(err.to_string().contains("502"), "got: {err}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("test-key", Some(&server.uri())).unwrap();
        let err = client.chat_completion(&test_request()).await.unwrap_err();
        assert!(err.to_string().contains("failed to parse"), "got: {err}");
    }

    #[test]
    fn base_url_defaults_and_trims_trailing_slash() {
        let client = OpenAiClient::new("k", None).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        let client = OpenAiClient::new("k", Some("https://api.deepseek.com/")).unwrap();
        assert_eq!(client.endpoint(), "https://api.deepseek.com/chat/completions");
    }

    #[test]
    fn invalid_key_is_config_error() {
        let err = OpenAiClient::new("bad\nkey", None).unwrap_err();
        assert!(matches!(err, HotflowError::Config(_)));
    }
}
