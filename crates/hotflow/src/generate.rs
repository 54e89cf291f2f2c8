// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hotflow generate-copy` command implementation.

use std::sync::Arc;

use clap::Args;
use hotflow_config::Settings;
use hotflow_copywriter::{CopyWriter, GenerateOptions, DEFAULT_PLATFORMS};
use hotflow_core::{HotflowError, ItemQuery, StorageAdapter};
use hotflow_openai::OpenAiProvider;

use crate::pipeline::{generate_and_store_creatives, GenerateRequest};
use crate::storage::open_storage;

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Generate creatives for specific item IDs.
    #[arg(long = "item-id")]
    pub item_ids: Vec<i64>,

    /// Only items in these categories.
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Limit the number of items to process.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Target platforms for copy generation.
    #[arg(long = "platform")]
    pub platforms: Vec<String>,

    /// Number of variants per platform.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub variants: u32,

    /// Optional system message sent ahead of the prompt.
    #[arg(long)]
    pub system_prompt: Option<String>,
}

impl GenerateArgs {
    pub fn request(&self) -> GenerateRequest {
        let platforms = if self.platforms.is_empty() {
            DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect()
        } else {
            self.platforms.clone()
        };
        GenerateRequest {
            query: ItemQuery {
                limit: self.limit,
                categories: self.categories.clone(),
                item_ids: self.item_ids.clone(),
            },
            options: GenerateOptions {
                platforms,
                variants: self.variants,
                system_prompt: self.system_prompt.clone(),
            },
        }
    }
}

/// Run the `hotflow generate-copy` command.
///
/// Fails before touching storage when no LLM credentials are configured.
pub async fn run_generate_copy(settings: &Settings, args: &GenerateArgs) -> Result<(), HotflowError> {
    let llm = settings.require_llm()?;
    let provider = Arc::new(OpenAiProvider::new(llm)?);
    let writer = CopyWriter::new(provider, llm.model.clone(), llm.temperature);
    let storage = open_storage(settings).await?;

    let request = args.request();
    let creatives = generate_and_store_creatives(&writer, &storage, &request).await?;
    storage.close().await?;

    println!(
        "Generated {} creatives across {} platform(s).",
        creatives.len(),
        request.options.platforms.len()
    );
    Ok(())
}
