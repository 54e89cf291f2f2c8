// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! reqwest-backed [`HttpTransport`].

use std::time::Duration;

use async_trait::async_trait;
use hotflow_core::types::AdapterType;
use hotflow_core::{HotflowError, HttpTransport, PluginAdapter};
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

/// Per-request ceiling for affiliate API calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Production HTTP transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, HotflowError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HotflowError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client })
    }
}

impl PluginAdapter for ReqwestTransport {
    fn name(&self) -> &str {
        "reqwest"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, HotflowError> {
        let url = Url::parse_with_params(url, query).map_err(|e| HotflowError::Transport {
            message: format!("invalid endpoint URL `{url}`: {e}"),
            source: Some(Box::new(e)),
        })?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HotflowError::Transport {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "affiliate API response received");
        let response = response
            .error_for_status()
            .map_err(|e| HotflowError::Transport {
                message: format!("affiliate API returned {status}"),
                source: Some(Box::new(e)),
            })?;

        response.json::<Value>().await.map_err(|e| HotflowError::Transport {
            message: format!("failed to decode response body: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_query_and_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/router/rest"))
            .and(query_param("q", "猫粮"))
            .and(query_param("timestamp", "2024-01-01 00:00:00"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let query = vec![
            ("q".to_string(), "猫粮".to_string()),
            ("timestamp".to_string(), "2024-01-01 00:00:00".to_string()),
        ];
        let body = transport
            .get_json(&format!("{}/router/rest", server.uri()), &query)
            .await
            .unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let err = transport.get_json(&server.uri(), &[]).await.unwrap_err();
        assert!(matches!(err, HotflowError::Transport { .. }));
        assert!(err.to_string().contains("502"), "got: {err}");
    }

    #[tokio::test]
    async fn undecodable_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let err = transport.get_json(&server.uri(), &[]).await.unwrap_err();
        assert!(err.to_string().contains("decode"), "got: {err}");
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_sending() {
        let transport = ReqwestTransport::new().unwrap();
        let err = transport.get_json("not a url", &[]).await.unwrap_err();
        assert!(err.to_string().contains("invalid endpoint URL"));
    }
}
