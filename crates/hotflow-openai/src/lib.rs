// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible chat provider for HotFlow.
//!
//! This crate implements [`ChatProvider`] on top of the Chat Completions API.
//! The same client serves OpenAI and DeepSeek; only the base URL, key and
//! reported provider label differ.

pub mod client;
pub mod types;

use async_trait::async_trait;
use hotflow_config::LlmSettings;
use hotflow_core::types::{AdapterType, ChatRequest, ChatResponse};
use hotflow_core::{ChatProvider, HotflowError, PluginAdapter};
use secrecy::ExposeSecret;
use tracing::{debug, info};

pub use crate::client::{OpenAiClient, DEFAULT_BASE_URL};
use crate::types::{ApiMessage, CompletionRequest};

/// Chat provider implementing [`ChatProvider`] for OpenAI-compatible APIs.
pub struct OpenAiProvider {
    client: OpenAiClient,
    label: String,
}

impl OpenAiProvider {
    /// Creates a provider from resolved LLM settings.
    pub fn new(settings: &LlmSettings) -> Result<Self, HotflowError> {
        let client = OpenAiClient::new(
            settings.api_key.expose_secret(),
            settings.base_url.as_deref(),
        )?;
        info!(
            provider = %settings.provider,
            model = %settings.model,
            base_url = client.base_url(),
            "chat provider initialized"
        );
        Ok(Self::with_client(client, settings.provider.to_string()))
    }

    /// Creates a provider around an existing client.
    pub fn with_client(client: OpenAiClient, label: impl Into<String>) -> Self {
        Self {
            client,
            label: label.into(),
        }
    }

    fn to_completion_request(request: ChatRequest) -> CompletionRequest {
        CompletionRequest {
            model: request.model,
            temperature: request.temperature,
            messages: request
                .messages
                .into_iter()
                .map(|m| ApiMessage {
                    role: m.role,
                    content: m.content,
                })
                .collect(),
            stream: false,
        }
    }
}

impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        &self.label
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, HotflowError> {
        let api_request = Self::to_completion_request(request);
        let response = self.client.chat_completion(&api_request).await?;
        if let Some(usage) = response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion usage"
            );
        }
        Ok(ChatResponse {
            content: response.first_content(),
            model: response.model.clone(),
        })
    }
}
