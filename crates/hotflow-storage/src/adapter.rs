// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use hotflow_core::{
    AdapterType, Creative, HotflowError, Item, ItemQuery, PluginAdapter, StorageAdapter,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened on the first call to
/// [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    database_url: String,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage for the given connection string.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`] is called.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            db: OnceCell::new(),
        }
    }

    /// Create and initialize in one step.
    pub async fn open(database_url: impl Into<String>) -> Result<Self, HotflowError> {
        let storage = Self::new(database_url);
        storage.initialize().await?;
        Ok(storage)
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, HotflowError> {
        self.db.get().ok_or_else(|| HotflowError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), HotflowError> {
        let db = Database::open(&self.database_url).await?;
        self.db.set(db).map_err(|_| HotflowError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(url = %self.database_url, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), HotflowError> {
        self.db()?.checkpoint().await
    }

    async fn store_items(&self, items: &[Item]) -> Result<usize, HotflowError> {
        queries::items::store_items(self.db()?, items).await
    }

    async fn fetch_items(&self, query: &ItemQuery) -> Result<Vec<Item>, HotflowError> {
        queries::items::fetch_items(self.db()?, query).await
    }

    async fn store_creatives(&self, creatives: &[Creative]) -> Result<usize, HotflowError> {
        queries::creatives::store_creatives(self.db()?, creatives).await
    }

    async fn list_creatives(
        &self,
        item_id: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<Creative>, HotflowError> {
        queries::creatives::list_creatives(self.db()?, item_id, limit).await
    }
}
