// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tolerant coercion of upstream search entries into [`Item`]s.
//!
//! Upstream fields arrive as strings, numbers or nulls depending on the
//! material type. A field that cannot be coerced becomes `None`; it never
//! fails the whole entry.

use std::str::FromStr;

use hotflow_core::Item;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::debug;

/// Textual form of a scalar. Null, empty strings and containers yield `None`.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Decimal from a number or numeric string.
pub fn safe_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        other => {
            debug!(value = %other, "cannot convert to decimal");
            return None;
        }
    };
    let parsed = Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text));
    match parsed {
        Ok(d) => Some(d),
        Err(e) => {
            debug!(value = %text, error = %e, "cannot convert to decimal");
            None
        }
    }
}

/// Integer from a number or numeric string, truncating any fraction.
pub fn safe_int(value: &Value) -> Option<i64> {
    let float = match value {
        Value::Null => return None,
        Value::String(s) if s.trim().is_empty() => return None,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            n.as_f64()
        }
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match float {
        Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Some(f.trunc() as i64),
        _ => {
            debug!(value = %value, "cannot convert to integer");
            None
        }
    }
}

fn field<'a>(raw: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    raw.get(name).filter(|v| !is_blank(v))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn text(raw: &Map<String, Value>, name: &str) -> Option<String> {
    raw.get(name).and_then(as_text)
}

fn decimal(raw: &Map<String, Value>, name: &str) -> Option<Decimal> {
    raw.get(name).and_then(safe_decimal)
}

/// Price after the coupon, never below zero. Without a coupon amount the
/// price itself is returned.
pub fn coupon_price(price: Option<Decimal>, coupon_amount: Option<Decimal>) -> Option<Decimal> {
    let price = price?;
    match coupon_amount {
        Some(amount) => Some(
            price
                .checked_sub(amount)
                .map_or(Decimal::ZERO, |p| p.max(Decimal::ZERO)),
        ),
        None => Some(price),
    }
}

/// Human readable coupon terms, e.g. `满89减20；券有效期至2026-12-31`.
pub fn coupon_description(raw: &Map<String, Value>) -> Option<String> {
    let mut parts = Vec::new();
    if let (Some(start), Some(amount)) = (text(raw, "coupon_start_fee"), text(raw, "coupon_amount"))
    {
        parts.push(format!("满{start}减{amount}"));
    }
    if let Some(end) = text(raw, "coupon_end_time") {
        parts.push(format!("券有效期至{end}"));
    }
    if parts.is_empty() {
        text(raw, "coupon_info")
    } else {
        Some(parts.join("；"))
    }
}

/// Positive item identifier of an entry.
pub fn item_id(raw: &Map<String, Value>) -> Option<i64> {
    let id = match raw.get("item_id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}

/// Maps one upstream entry to an [`Item`] tagged with `keyword`.
///
/// Returns `None` only when the entry has no usable `item_id`.
pub fn parse_item(raw: &Map<String, Value>, keyword: &str) -> Option<Item> {
    let item_id = item_id(raw)?;

    let price = decimal(raw, "zk_final_price").or_else(|| decimal(raw, "reserve_price"));
    let coupon_amount = decimal(raw, "coupon_amount");
    let title = text(raw, "short_title")
        .or_else(|| text(raw, "title"))
        .unwrap_or_default();

    let mut item = Item::new(item_id, keyword, title);
    item.image_url = text(raw, "pict_url");
    item.price = price;
    item.coupon_price = coupon_price(price, coupon_amount);
    item.commission_rate = decimal(raw, "commission_rate")
        .and_then(|rate| rate.checked_div(Decimal::ONE_HUNDRED));
    item.monthly_sales = field(raw, "volume")
        .or_else(|| field(raw, "month_sales"))
        .and_then(safe_int);
    item.shop_score = decimal(raw, "shop_dsr");
    item.shop_title = text(raw, "shop_title");
    item.item_url = text(raw, "url").or_else(|| text(raw, "item_url"));
    item.coupon_url = text(raw, "coupon_share_url").or_else(|| text(raw, "coupon_click_url"));
    item.coupon_info = coupon_description(raw);
    item.tags = vec![keyword.to_string()];
    item.raw = raw.clone();
    Some(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn safe_decimal_accepts_numbers_and_strings() {
        assert_eq!(safe_decimal(&json!("12.50")), Some(dec("12.50")));
        assert_eq!(safe_decimal(&json!(" 3 ")), Some(dec("3")));
        assert_eq!(safe_decimal(&json!(7)), Some(dec("7")));
        assert_eq!(safe_decimal(&json!(1.5)), Some(dec("1.5")));
    }

    #[test]
    fn safe_decimal_degrades_to_none() {
        assert_eq!(safe_decimal(&Value::Null), None);
        assert_eq!(safe_decimal(&json!("")), None);
        assert_eq!(safe_decimal(&json!("abc")), None);
        assert_eq!(safe_decimal(&json!([1])), None);
    }

    #[test]
    fn safe_int_truncates_floats_and_numeric_strings() {
        assert_eq!(safe_int(&json!("1234.9")), Some(1234));
        assert_eq!(safe_int(&json!(56.7)), Some(56));
        assert_eq!(safe_int(&json!(42)), Some(42));
        assert_eq!(safe_int(&json!("1e3")), Some(1000));
    }

    #[test]
    fn safe_int_degrades_to_none() {
        assert_eq!(safe_int(&Value::Null), None);
        assert_eq!(safe_int(&json!("")), None);
        assert_eq!(safe_int(&json!("lots")), None);
        assert_eq!(safe_int(&json!("NaN")), None);
        assert_eq!(safe_int(&json!({"n": 1})), None);
    }

    #[test]
    fn coupon_price_is_clamped_at_zero() {
        assert_eq!(coupon_price(Some(dec("10")), Some(dec("15"))), Some(Decimal::ZERO));
        assert_eq!(coupon_price(Some(dec("89.90")), Some(dec("20"))), Some(dec("69.90")));
        assert_eq!(coupon_price(Some(dec("5")), None), Some(dec("5")));
        assert_eq!(coupon_price(None, Some(dec("5"))), None);
    }

    proptest! {
        #[test]
        fn coupon_price_never_negative(
            price in any::<i64>().prop_map(|m| Decimal::new(m, 2)),
            amount in any::<i64>().prop_map(|m| Decimal::new(m, 2)),
        ) {
            let result = coupon_price(Some(price), Some(amount)).unwrap();
            prop_assert!(result >= Decimal::ZERO);
        }
    }

    #[test]
    fn parses_full_entry() {
        let raw = object(json!({
            "item_id": "6543210",
            "title": "long title",
            "short_title": "short",
            "pict_url": "//img.example.com/a.jpg",
            "zk_final_price": "59.00",
            "reserve_price": "99.00",
            "coupon_amount": "10",
            "coupon_start_fee": "59",
            "coupon_end_time": "2026-11-11",
            "commission_rate": "1550",
            "volume": "2300.0",
            "shop_dsr": 48000,
            "shop_title": "旗舰店",
            "url": "//detail.example.com/1",
            "coupon_click_url": "//coupon.example.com/1"
        }));
        let item = parse_item(&raw, "洗衣液").unwrap();

        assert_eq!(item.item_id, 6_543_210);
        assert_eq!(item.category, "洗衣液");
        assert_eq!(item.title, "short");
        assert_eq!(item.price, Some(dec("59.00")));
        assert_eq!(item.coupon_price, Some(dec("49.00")));
        assert_eq!(item.commission_rate, Some(dec("15.5")));
        assert_eq!(item.monthly_sales, Some(2300));
        assert_eq!(item.shop_score, Some(dec("48000")));
        assert_eq!(item.shop_title.as_deref(), Some("旗舰店"));
        assert_eq!(item.item_url.as_deref(), Some("//detail.example.com/1"));
        assert_eq!(item.coupon_url.as_deref(), Some("//coupon.example.com/1"));
        assert_eq!(
            item.coupon_info.as_deref(),
            Some("满59减10；券有效期至2026-11-11")
        );
        assert_eq!(item.tags, vec!["洗衣液"]);
        assert_eq!(item.raw, raw);
    }

    #[test]
    fn price_falls_back_to_reserve_price() {
        let raw = object(json!({"item_id": 1, "reserve_price": "20", "zk_final_price": ""}));
        let item = parse_item(&raw, "k").unwrap();
        assert_eq!(item.price, Some(dec("20")));
        assert_eq!(item.coupon_price, Some(dec("20")));
    }

    #[test]
    fn sparse_entry_yields_absent_fields() {
        let raw = object(json!({"item_id": 9, "volume": "n/a", "commission_rate": null}));
        let item = parse_item(&raw, "k").unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.price, None);
        assert_eq!(item.coupon_price, None);
        assert_eq!(item.commission_rate, None);
        assert_eq!(item.monthly_sales, None);
        assert_eq!(item.coupon_info, None);
    }

    #[test]
    fn monthly_sales_uses_month_sales_when_volume_missing() {
        let raw = object(json!({"item_id": 9, "volume": "", "month_sales": 77}));
        assert_eq!(parse_item(&raw, "k").unwrap().monthly_sales, Some(77));

        let raw = object(json!({"item_id": 9, "volume": 0, "month_sales": 77}));
        assert_eq!(parse_item(&raw, "k").unwrap().monthly_sales, Some(0));
    }

    #[test]
    fn coupon_description_falls_back_to_coupon_info() {
        let raw = object(json!({"coupon_info": "满100元减5元"}));
        assert_eq!(coupon_description(&raw).as_deref(), Some("满100元减5元"));

        let raw = object(json!({"coupon_amount": "5"}));
        assert_eq!(coupon_description(&raw), None);

        let raw = object(json!({"coupon_end_time": "2026-01-01", "coupon_info": "ignored"}));
        assert_eq!(coupon_description(&raw).as_deref(), Some("券有效期至2026-01-01"));
    }

    #[test]
    fn entries_without_valid_id_are_rejected() {
        for raw in [
            json!({}),
            json!({"item_id": null}),
            json!({"item_id": "abc"}),
            json!({"item_id": 0}),
            json!({"item_id": -3}),
        ] {
            assert!(parse_item(&object(raw.clone()), "k").is_none(), "{raw}");
        }
    }
}
