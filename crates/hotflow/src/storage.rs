// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hotflow init-db` and the storage handle shared by every command.

use hotflow_config::Settings;
use hotflow_core::{HotflowError, StorageAdapter};
use hotflow_storage::SqliteStorage;

/// Open the configured database, creating the schema if needed.
pub async fn open_storage(settings: &Settings) -> Result<SqliteStorage, HotflowError> {
    SqliteStorage::open(settings.database_url.as_str()).await
}

/// Run the `hotflow init-db` command.
pub async fn run_init_db(settings: &Settings) -> Result<(), HotflowError> {
    let storage = open_storage(settings).await?;
    storage.close().await?;
    println!("Database schema initialized.");
    Ok(())
}
