// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample items and affiliate API payloads.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{json, Value};

use hotflow_core::Item;

/// A fully populated item in category `猫粮`.
pub fn sample_item(item_id: i64) -> Item {
    let mut item = Item::new(item_id, "猫粮", format!("全价猫粮 {item_id}"));
    item.image_url = Some(format!("https://img.example.com/{item_id}.jpg"));
    item.price = Decimal::from_str("89.90").ok();
    item.coupon_price = Decimal::from_str("69.90").ok();
    item.commission_rate = Decimal::from_str("0.2").ok();
    item.monthly_sales = Some(12_345);
    item.shop_title = Some("萌宠旗舰店".to_string());
    item.item_url = Some(format!("https://detail.example.com/{item_id}"));
    item.coupon_info = Some("满89减20".to_string());
    item.tags = vec!["猫粮".to_string()];
    if let Value::Object(raw) = search_entry(item_id) {
        item.raw = raw;
    }
    item
}

/// One upstream search entry as returned in `map_data`.
pub fn search_entry(item_id: i64) -> Value {
    json!({
        "item_id": item_id,
        "title": format!("全价猫粮 {item_id} 成猫幼猫通用"),
        "short_title": format!("全价猫粮 {item_id}"),
        "pict_url": format!("https://img.example.com/{item_id}.jpg"),
        "zk_final_price": "89.90",
        "reserve_price": "129.00",
        "coupon_amount": "20",
        "coupon_start_fee": "89",
        "coupon_end_time": "2026-12-31",
        "commission_rate": "20.00",
        "volume": 12345,
        "shop_title": "萌宠旗舰店",
        "url": format!("https://detail.example.com/{item_id}"),
        "coupon_share_url": format!("https://coupon.example.com/{item_id}"),
        "provcity": "浙江 杭州",
        "level_one_category_name": "宠物/宠物食品及用品",
    })
}

/// A successful search payload wrapping `entries`.
pub fn search_page(entries: Vec<Value>) -> Value {
    let total = entries.len();
    json!({
        "tbk_dg_material_optional_response": {
            "result_list": { "map_data": entries },
            "total_results": total,
        }
    })
}

/// A successful search payload with `count` entries numbered from `first_id`.
pub fn numbered_page(first_id: i64, count: usize) -> Value {
    let entries = (0..count as i64)
        .map(|offset| search_entry(first_id + offset))
        .collect();
    search_page(entries)
}

/// An `error_response` envelope.
pub fn error_page(code: i64, msg: &str, sub_msg: &str) -> Value {
    json!({
        "error_response": {
            "code": code,
            "msg": msg,
            "sub_code": "isv.invalid-parameter",
            "sub_msg": sub_msg,
        }
    })
}
