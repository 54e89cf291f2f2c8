// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generated copy persistence.

use hotflow_core::{Creative, HotflowError};
use rusqlite::params;
use rusqlite::types::Value;
use tracing::debug;

use crate::database::{map_tr_err, Database};
use crate::queries::{json_column, limit_value, timestamp_column, timestamp_to_sql};

/// Insert creatives in one transaction.
pub async fn store_creatives(db: &Database, creatives: &[Creative]) -> Result<usize, HotflowError> {
    if creatives.is_empty() {
        return Ok(0);
    }
    let creatives = creatives.to_vec();

    let stored = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            let tx = conn.transaction()?;
            {
                let mut insert = tx.prepare(
                    "INSERT INTO creatives (creative_id, item_id, platform, variant, content, \
                     prompt, model, temperature, provider, metadata, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                )?;
                for c in &creatives {
                    insert.execute(params![
                        c.creative_id,
                        c.item_id,
                        c.platform,
                        c.variant,
                        c.content,
                        c.prompt,
                        c.model,
                        c.temperature,
                        c.provider,
                        c.metadata.to_string(),
                        timestamp_to_sql(&c.created_at),
                    ])?;
                }
            }
            tx.commit()?;
            Ok(creatives.len())
        })
        .await
        .map_err(map_tr_err)?;

    debug!(stored, "creatives stored");
    Ok(stored)
}

/// List creatives newest first; ties go by item id, platform, then variant.
pub async fn list_creatives(
    db: &Database,
    item_id: Option<i64>,
    limit: Option<usize>,
) -> Result<Vec<Creative>, HotflowError> {
    let mut sql = String::from(
        "SELECT creative_id, item_id, platform, variant, content, prompt, model, \
         temperature, provider, metadata, created_at FROM creatives",
    );
    let mut values: Vec<Value> = Vec::new();
    if let Some(id) = item_id {
        values.push(Value::Integer(id));
        sql.push_str(" WHERE item_id = ?1");
    }
    sql.push_str(" ORDER BY created_at DESC, item_id ASC, platform ASC, variant ASC");
    if let Some(limit) = limit_value(limit) {
        values.push(Value::Integer(limit));
        sql.push_str(&format!(" LIMIT ?{}", values.len()));
    }

    db.connection()
        .call(move |conn| -> Result<Vec<Creative>, rusqlite::Error> {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(values), |row| {
                Ok(Creative {
                    creative_id: row.get(0)?,
                    item_id: row.get(1)?,
                    platform: row.get(2)?,
                    variant: row.get(3)?,
                    content: row.get(4)?,
                    prompt: row.get(5)?,
                    model: row.get(6)?,
                    temperature: row.get(7)?,
                    provider: row.get(8)?,
                    metadata: json_column(row, 9)?,
                    created_at: timestamp_column(row, 10)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}
