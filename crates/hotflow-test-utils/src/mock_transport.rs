// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock HTTP transport serving queued JSON payloads.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use hotflow_core::types::AdapterType;
use hotflow_core::{HotflowError, HttpTransport, PluginAdapter};

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of the first query parameter named `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport that answers each `get_json` with the next queued payload.
///
/// An exhausted queue is reported as a transport error so tests notice
/// unexpected extra requests.
#[derive(Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Value>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport pre-loaded with payloads.
    pub fn with_responses(responses: Vec<Value>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::default(),
        }
    }

    pub async fn push_response(&self, payload: Value) {
        self.responses.lock().await.push_back(payload);
    }

    /// Requests received so far, in order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

impl PluginAdapter for MockTransport {
    fn name(&self) -> &str {
        "mock-transport"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, HotflowError> {
        self.requests.lock().await.push(RecordedRequest {
            url: url.to_string(),
            query: query.to_vec(),
        });
        self.responses
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| HotflowError::transport("mock transport has no queued response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn serves_payloads_in_order_and_records_requests() {
        let transport = MockTransport::with_responses(vec![json!({"n": 1}), json!({"n": 2})]);
        let query = vec![("q".to_string(), "猫粮".to_string())];

        assert_eq!(transport.get_json("http://x", &query).await.unwrap()["n"], 1);
        assert_eq!(transport.get_json("http://x", &[]).await.unwrap()["n"], 2);

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].param("q"), Some("猫粮"));
        assert_eq!(requests[1].param("q"), None);
    }

    #[tokio::test]
    async fn exhausted_queue_is_a_transport_error() {
        let transport = MockTransport::new();
        let err = transport.get_json("http://x", &[]).await.unwrap_err();
        assert!(matches!(err, HotflowError::Transport { .. }));
    }
}
