// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the affiliate client, the copy generator and storage.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies the type of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Transport,
    Provider,
    Storage,
}

/// A normalized affiliate product record.
///
/// Built by the affiliate client from one upstream search entry and replaced
/// wholesale in storage whenever it is fetched again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: i64,
    /// The search keyword that produced this item.
    pub category: String,
    pub title: String,
    pub image_url: Option<String>,
    pub price: Option<Decimal>,
    /// Price after the coupon amount, never below zero.
    pub coupon_price: Option<Decimal>,
    /// Commission as a fraction (upstream percentage / 100).
    pub commission_rate: Option<Decimal>,
    pub monthly_sales: Option<i64>,
    pub shop_score: Option<Decimal>,
    pub shop_title: Option<String>,
    pub item_url: Option<String>,
    pub coupon_url: Option<String>,
    pub coupon_info: Option<String>,
    pub tags: Vec<String>,
    /// The unmodified upstream entry.
    pub raw: serde_json::Map<String, serde_json::Value>,
}

impl Item {
    /// Creates an item with only the required fields set.
    pub fn new(item_id: i64, category: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            item_id,
            category: category.into(),
            title: title.into(),
            image_url: None,
            price: None,
            coupon_price: None,
            commission_rate: None,
            monthly_sales: None,
            shop_score: None,
            shop_title: None,
            item_url: None,
            coupon_url: None,
            coupon_info: None,
            tags: Vec::new(),
            raw: serde_json::Map::new(),
        }
    }
}

/// One generated marketing-copy variant for an item on a platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creative {
    pub creative_id: String,
    pub item_id: i64,
    pub platform: String,
    /// 1-based index within the platform for a single generation call.
    pub variant: u32,
    pub content: String,
    /// The exact prompt sent to the model.
    pub prompt: String,
    pub model: String,
    pub temperature: f64,
    pub provider: String,
    pub created_at: DateTime<Utc>,
    pub metadata: serde_json::Value,
}

/// The parts of a [`Creative`] chosen by the generator; identity and
/// timestamp are assigned by [`Creative::new`].
#[derive(Debug, Clone)]
pub struct NewCreative<'a> {
    pub item_id: i64,
    pub platform: &'a str,
    pub variant: u32,
    pub content: String,
    pub prompt: &'a str,
    pub model: &'a str,
    pub temperature: f64,
    pub provider: &'a str,
    pub metadata: serde_json::Value,
}

impl Creative {
    /// Creates a creative with a fresh random id and the current UTC time.
    pub fn new(parts: NewCreative<'_>) -> Self {
        Self {
            creative_id: uuid::Uuid::new_v4().simple().to_string(),
            item_id: parts.item_id,
            platform: parts.platform.to_string(),
            variant: parts.variant,
            content: parts.content,
            prompt: parts.prompt.to_string(),
            model: parts.model.to_string(),
            temperature: parts.temperature,
            provider: parts.provider.to_string(),
            created_at: Utc::now(),
            metadata: parts.metadata,
        }
    }
}

/// Filter for reading items back from storage. Empty filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub limit: Option<usize>,
    pub categories: Vec<String>,
    pub item_ids: Vec<i64>,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A non-streaming chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<ChatMessage>,
}

/// The text of the first choice of a chat completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub content: String,
    pub model: Option<String>,
}
