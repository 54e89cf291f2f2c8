// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Affiliate item persistence.

use chrono::Utc;
use hotflow_core::{HotflowError, Item, ItemQuery};
use rusqlite::params;
use rusqlite::types::Value;
use tracing::debug;

use crate::database::{map_tr_err, Database};
use crate::queries::{decimal_column, json_column, limit_value, timestamp_to_sql};

const ITEM_COLUMNS: &str = "item_id, category, title, image_url, coupon_price, price, \
     commission_rate, monthly_sales, shop_score, shop_title, item_url, coupon_url, \
     coupon_info, tags, raw";

/// Replace items by id in one transaction: existing rows with the same ids
/// are deleted, then every item is inserted with a fresh `updated_at`.
///
/// When the batch repeats an id, the last occurrence wins.
pub async fn store_items(db: &Database, items: &[Item]) -> Result<usize, HotflowError> {
    if items.is_empty() {
        return Ok(0);
    }
    let items = items.to_vec();
    let updated_at = timestamp_to_sql(&Utc::now());

    let stored = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            let tx = conn.transaction()?;
            {
                let mut delete = tx.prepare("DELETE FROM taoke_items WHERE item_id = ?1")?;
                for item in &items {
                    delete.execute(params![item.item_id])?;
                }

                let mut insert = tx.prepare(
                    "INSERT OR REPLACE INTO taoke_items (item_id, category, title, image_url, \
                     coupon_price, price, commission_rate, monthly_sales, shop_score, shop_title, \
                     item_url, coupon_url, coupon_info, tags, raw, updated_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                )?;
                for item in &items {
                    insert.execute(params![
                        item.item_id,
                        item.category,
                        item.title,
                        item.image_url,
                        item.coupon_price.map(|d| d.to_string()),
                        item.price.map(|d| d.to_string()),
                        item.commission_rate.map(|d| d.to_string()),
                        item.monthly_sales,
                        item.shop_score.map(|d| d.to_string()),
                        item.shop_title,
                        item.item_url,
                        item.coupon_url,
                        item.coupon_info,
                        item.tags.join(","),
                        serde_json::Value::Object(item.raw.clone()).to_string(),
                        updated_at,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(items.len())
        })
        .await
        .map_err(map_tr_err)?;

    debug!(stored, "items stored");
    Ok(stored)
}

/// Read items back, newest `updated_at` first with ties broken by ascending id.
///
/// Empty category and id filters match everything; a zero limit means no cap.
pub async fn fetch_items(db: &Database, query: &ItemQuery) -> Result<Vec<Item>, HotflowError> {
    let mut sql = format!("SELECT {ITEM_COLUMNS} FROM taoke_items");
    let mut clauses = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if !query.categories.is_empty() {
        clauses.push(format!(
            "category IN ({})",
            placeholders(values.len(), query.categories.len())
        ));
        values.extend(query.categories.iter().cloned().map(Value::Text));
    }
    if !query.item_ids.is_empty() {
        clauses.push(format!(
            "item_id IN ({})",
            placeholders(values.len(), query.item_ids.len())
        ));
        values.extend(query.item_ids.iter().copied().map(Value::Integer));
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY updated_at DESC, item_id ASC");
    if let Some(limit) = limit_value(query.limit) {
        sql.push_str(&format!(" LIMIT ?{}", values.len() + 1));
        values.push(Value::Integer(limit));
    }

    db.connection()
        .call(move |conn| -> Result<Vec<Item>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(values), row_to_item)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Numbered placeholders `?n` continuing after `offset` bound values.
fn placeholders(offset: usize, count: usize) -> String {
    (offset + 1..=offset + count)
        .map(|n| format!("?{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    let tags: String = row.get(13)?;
    Ok(Item {
        item_id: row.get(0)?,
        category: row.get(1)?,
        title: row.get(2)?,
        image_url: row.get(3)?,
        coupon_price: decimal_column(row, 4)?,
        price: decimal_column(row, 5)?,
        commission_rate: decimal_column(row, 6)?,
        monthly_sales: row.get(7)?,
        shop_score: decimal_column(row, 8)?,
        shop_title: row.get(9)?,
        item_url: row.get(10)?,
        coupon_url: row.get(11)?,
        coupon_info: row.get(12)?,
        tags: tags
            .split(',')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        raw: json_column(row, 14)?,
    })
}
