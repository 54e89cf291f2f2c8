// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::HotflowError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Creative, Item, ItemQuery};

/// Adapter for item and creative persistence.
///
/// Every write method runs as a single all-or-nothing transaction.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (connection, migrations).
    async fn initialize(&self) -> Result<(), HotflowError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), HotflowError>;

    /// Replaces the given items by id (delete-then-insert). Returns the count stored.
    async fn store_items(&self, items: &[Item]) -> Result<usize, HotflowError>;

    /// Reads items back, newest first.
    async fn fetch_items(&self, query: &ItemQuery) -> Result<Vec<Item>, HotflowError>;

    /// Inserts creatives. Returns the count stored.
    async fn store_creatives(&self, creatives: &[Creative]) -> Result<usize, HotflowError>;

    /// Lists creatives newest first, optionally for one item and capped in count.
    async fn list_creatives(
        &self,
        item_id: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Creative>, HotflowError>;
}
