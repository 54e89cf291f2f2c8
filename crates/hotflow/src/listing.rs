// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hotflow list-items` and `hotflow list-creatives`.

use clap::Args;
use hotflow_config::Settings;
use hotflow_core::{Creative, HotflowError, Item, ItemQuery, StorageAdapter};

use crate::storage::open_storage;

/// Characters of creative content shown per line.
const PREVIEW_CHARS: usize = 80;

#[derive(Args, Debug, Clone)]
pub struct ListItemsArgs {
    /// Number of items to display.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Filter by category.
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListCreativesArgs {
    /// Filter creatives by item id.
    #[arg(long)]
    pub item_id: Option<i64>,

    /// Number of creatives to display.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

pub fn format_item_line(item: &Item) -> String {
    let coupon_price = item
        .coupon_price
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());
    let sales = item
        .monthly_sales
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "[{}] {} | {} | 券后价: {coupon_price} | 月销量: {sales}",
        item.category, item.item_id, item.title
    )
}

pub fn format_creative_line(creative: &Creative) -> String {
    let mut preview: String = creative.content.chars().take(PREVIEW_CHARS).collect();
    if creative.content.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    format!(
        "Item {} | {} #{}: {preview}",
        creative.item_id, creative.platform, creative.variant
    )
}

/// Run the `hotflow list-items` command.
pub async fn run_list_items(settings: &Settings, args: &ListItemsArgs) -> Result<(), HotflowError> {
    let storage = open_storage(settings).await?;
    let items = storage
        .fetch_items(&ItemQuery {
            limit: Some(args.limit),
            categories: args.categories.clone(),
            item_ids: Vec::new(),
        })
        .await?;

    if items.is_empty() {
        println!("No items found.");
    }
    for item in &items {
        println!("{}", format_item_line(item));
    }
    Ok(())
}

/// Run the `hotflow list-creatives` command.
pub async fn run_list_creatives(
    settings: &Settings,
    args: &ListCreativesArgs,
) -> Result<(), HotflowError> {
    let storage = open_storage(settings).await?;
    let creatives = storage
        .list_creatives(args.item_id, Some(args.limit))
        .await?;

    if creatives.is_empty() {
        println!("No creatives found.");
    }
    for creative in &creatives {
        println!("{}", format_creative_line(creative));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use hotflow_core::NewCreative;
    use hotflow_test_utils::fixtures::sample_item;

    use super::*;

    fn creative(content: &str) -> Creative {
        Creative::new(NewCreative {
            item_id: 42,
            platform: "xiaohongshu",
            variant: 2,
            content: content.to_string(),
            prompt: "prompt",
            model: "gpt-4o-mini",
            temperature: 0.7,
            provider: "openai",
            metadata: serde_json::Value::Null,
        })
    }

    #[test]
    fn item_line_shows_price_and_sales() {
        let line = format_item_line(&sample_item(1001));
        assert_eq!(
            line,
            "[猫粮] 1001 | 全价猫粮 1001 | 券后价: 69.90 | 月销量: 12345"
        );
    }

    #[test]
    fn item_line_marks_missing_values() {
        let line = format_item_line(&Item::new(5, "抽纸", "三层抽纸"));
        assert!(line.ends_with("券后价: - | 月销量: -"), "got: {line}");
    }

    #[test]
    fn short_creatives_are_shown_whole() {
        assert_eq!(
            format_creative_line(&creative("好用不贵")),
            "Item 42 | xiaohongshu #2: 好用不贵"
        );
    }

    #[test]
    fn long_creatives_are_cut_on_character_boundaries() {
        let content = "猫".repeat(100);
        let line = format_creative_line(&creative(&content));
        let preview = line.split(": ").nth(1).unwrap();
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }
}
