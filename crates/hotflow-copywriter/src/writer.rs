// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Copy generation against a chat provider.

use std::sync::Arc;

use hotflow_core::types::{ChatMessage, ChatRequest, NewCreative};
use hotflow_core::{ChatProvider, Creative, HotflowError, Item};
use serde_json::json;
use tracing::{debug, warn};

use crate::parse::parse_reply;
use crate::prompt::{build_prompt, DEFAULT_PLATFORMS};

/// What to generate for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub platforms: Vec<String>,
    /// Variants requested per platform.
    pub variants: u32,
    /// Optional leading system message.
    pub system_prompt: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            platforms: DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect(),
            variants: 3,
            system_prompt: None,
        }
    }
}

/// Generates creatives for items with one chat request per item.
pub struct CopyWriter {
    provider: Arc<dyn ChatProvider>,
    model: String,
    temperature: f64,
}

impl CopyWriter {
    pub fn new(provider: Arc<dyn ChatProvider>, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Label recorded on every creative, e.g. `openai` or `deepseek`.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Builds the prompt, calls the model once and turns the reply into creatives.
    ///
    /// Returns an empty vector when the reply contains no usable text.
    pub async fn generate(
        &self,
        item: &Item,
        options: &GenerateOptions,
    ) -> Result<Vec<Creative>, HotflowError> {
        let prompt = build_prompt(item, &options.platforms, options.variants);

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = options.system_prompt.as_deref().filter(|s| !s.trim().is_empty()) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt.as_str()));

        debug!(
            provider = self.provider_name(),
            model = %self.model,
            item_id = item.item_id,
            "requesting copy"
        );
        let response = self
            .provider
            .complete(ChatRequest {
                model: self.model.clone(),
                temperature: self.temperature,
                messages,
            })
            .await?;

        let parsed = parse_reply(&response.content, &options.platforms, options.variants);
        let metadata = json!({
            "platforms": options.platforms,
            "variants_requested": options.variants,
        });

        let mut creatives = Vec::with_capacity(parsed.total());
        for (platform, texts) in parsed.platforms {
            for (index, content) in texts.into_iter().enumerate() {
                creatives.push(Creative::new(NewCreative {
                    item_id: item.item_id,
                    platform: &platform,
                    variant: index as u32 + 1,
                    content,
                    prompt: &prompt,
                    model: &self.model,
                    temperature: self.temperature,
                    provider: self.provider_name(),
                    metadata: metadata.clone(),
                }));
            }
        }

        if creatives.is_empty() {
            warn!(item_id = item.item_id, "no creatives generated");
        }
        Ok(creatives)
    }
}
