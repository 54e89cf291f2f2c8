// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestration of fetch-then-store and generate-then-store runs.
//!
//! Both flows await every step in order: one keyword or item at a time, one
//! storage transaction per batch.

use hotflow_copywriter::{CopyWriter, GenerateOptions};
use hotflow_core::{Creative, HotflowError, ItemQuery, StorageAdapter};
use hotflow_taobao::{FetchOptions, TaobaoClient};
use tracing::{info, warn};

/// Which items to write copy for, and what to write.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub query: ItemQuery,
    pub options: GenerateOptions,
}

/// Fetch every keyword and store each non-empty batch.
///
/// Returns the total number of items stored. An upstream API error aborts
/// the run; batches stored before it stay stored.
pub async fn fetch_and_store<S: AsRef<str>>(
    client: &TaobaoClient,
    storage: &dyn StorageAdapter,
    keywords: &[S],
    options: &FetchOptions,
) -> Result<usize, HotflowError> {
    let mut total = 0;
    for keyword in keywords {
        let keyword = keyword.as_ref();
        info!(keyword, "fetching keyword");
        let items = client.fetch_many(keyword, options).await?;
        if items.is_empty() {
            warn!(keyword, "no items returned for keyword");
            continue;
        }
        let stored = storage.store_items(&items).await?;
        info!(keyword, count = stored, "stored items");
        total += stored;
    }
    Ok(total)
}

/// Generate creatives for the selected items and store them item by item.
///
/// Returns every creative produced, in item order.
pub async fn generate_and_store_creatives(
    writer: &CopyWriter,
    storage: &dyn StorageAdapter,
    request: &GenerateRequest,
) -> Result<Vec<Creative>, HotflowError> {
    let items = storage.fetch_items(&request.query).await?;
    if items.is_empty() {
        warn!("no items found for creative generation");
        return Ok(Vec::new());
    }

    let mut all = Vec::new();
    for item in &items {
        info!(item_id = item.item_id, "generating creatives");
        let generated = writer.generate(item, &request.options).await?;
        storage.store_creatives(&generated).await?;
        all.extend(generated);
    }
    Ok(all)
}
