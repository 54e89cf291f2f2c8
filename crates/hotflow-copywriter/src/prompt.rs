// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt template and item feature derivation.

use hotflow_core::Item;
use rust_decimal::Decimal;
use serde_json::Value;

/// Platforms written for when the caller names none.
pub const DEFAULT_PLATFORMS: [&str; 3] = ["xiaohongshu", "weibo", "zhihu"];

const UNKNOWN: &str = "未知";
const FALLBACK_FEATURES: &str = "口碑好, 性价比高";
const FALLBACK_SHOP: &str = "优质店铺";
const FALLBACK_COUPON: &str = "下单立减, 先到先得";

/// Display name of a known platform key.
pub fn platform_label(platform: &str) -> Option<&'static str> {
    match platform {
        "xiaohongshu" => Some("小红书图文笔记"),
        "weibo" => Some("微博短文"),
        "zhihu" => Some("知乎回答"),
        _ => None,
    }
}

/// `¥12.30`, or `未知` when absent.
pub fn format_price(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("¥{:.2}", v.round_dp(2)),
        None => UNKNOWN.to_string(),
    }
}

/// Exact count below ten thousand, otherwise `1.2万+`.
pub fn format_sales(value: Option<i64>) -> String {
    match value {
        None => UNKNOWN.to_string(),
        Some(v) if v >= 10_000 => format!("{:.1}万+", v as f64 / 10_000.0),
        Some(v) => v.to_string(),
    }
}

fn raw_text<'a>(item: &'a Item, key: &str) -> Option<&'a str> {
    item.raw
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn image_count(item: &Item) -> Option<usize> {
    let images = match item.raw.get("small_images")? {
        Value::Object(map) => map.get("string")?,
        other => other,
    };
    images.as_array().map(Vec::len).filter(|n| *n > 0)
}

/// Selling points pulled from the raw upstream entry and the item's tags.
pub fn derive_features(item: &Item) -> String {
    let mut features = Vec::new();
    if let Some(highlight) =
        raw_text(item, "item_description").or_else(|| raw_text(item, "item_short_title"))
    {
        features.push(highlight.to_string());
    }
    if let Some(origin) = raw_text(item, "provcity") {
        features.push(format!("发货地 {origin}"));
    }
    if let Some(category) = raw_text(item, "level_one_category_name") {
        features.push(format!("类目：{category}"));
    }
    if let Some(count) = image_count(item) {
        features.push(format!("精选图{count}张"));
    }
    if !item.tags.is_empty() {
        features.push(format!("#{}", item.tags.join(" #")));
    }
    if features.is_empty() {
        return FALLBACK_FEATURES.to_string();
    }
    features.join("；")
}

/// Renders the copywriting instruction for `item`.
pub fn build_prompt<S: AsRef<str>>(item: &Item, platforms: &[S], variants: u32) -> String {
    let platform_keys = platforms
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    let coupon_price = format_price(item.coupon_price.or(item.price));
    let price = format_price(item.price);
    let monthly_sales = format_sales(item.monthly_sales);
    let shop_title = item.shop_title.as_deref().unwrap_or(FALLBACK_SHOP);
    let features = derive_features(item);
    let coupon_info = item
        .coupon_info
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_COUPON);
    let category = &item.category;
    let title = &item.title;

    format!(
        "你是一名擅长电商种草文案的写手, 擅长用真实体验打动消费者。\n\n\
请根据以下商品信息, 为每个平台生成 {variants} 条不同风格的推广文案。\n\n\
输出要求:\n\
1. 每个平台输出一个数组, 其中包含 {variants} 条文案字符串。\n\
2. 结果必须是 JSON 格式, 字段名使用平台英文标识: {platform_keys}。\n\
3. 文案需要自然真实, 强调省钱、使用体验和复购感受。\n\
4. 合理添加 emoji, 但避免过度使用。\n\n\
商品信息:\n\
- 品类: {category}\n\
- 名称: {title}\n\
- 券后价: {coupon_price}\n\
- 原价: {price}\n\
- 月销量: {monthly_sales}\n\
- 店铺: {shop_title}\n\
- 核心卖点: {features}\n\
- 优惠信息: {coupon_info}\n\n\
如果信息缺失, 请合理发挥但不要捏造夸张数据。"
    )
}
