// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat provider trait for OpenAI-compatible completion endpoints.

use async_trait::async_trait;

use crate::error::HotflowError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatRequest, ChatResponse};

/// Adapter for LLM chat-completion providers.
#[async_trait]
pub trait ChatProvider: PluginAdapter {
    /// Sends one non-streaming completion request and returns the first choice.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, HotflowError>;
}
