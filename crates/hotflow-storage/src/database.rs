// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management.
//!
//! A [`Database`] owns the single `tokio-rusqlite` connection. All reads and
//! writes are funneled through its background thread, so writes never
//! contend with each other.

use std::path::PathBuf;

use hotflow_core::HotflowError;
use tracing::debug;

/// Where a connection string points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// Parse a connection string.
    ///
    /// Accepted forms: `sqlite://<path>`, `sqlite:///<abs path>`, a bare path,
    /// and `sqlite://`, `sqlite::memory:`, `sqlite://:memory:` or `:memory:`
    /// for an in-memory database. Any other scheme is rejected.
    pub fn parse(url: &str) -> Result<Self, HotflowError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(HotflowError::Config("database URL is empty".to_string()));
        }
        if matches!(url, ":memory:" | "sqlite::memory:") {
            return Ok(Self::Memory);
        }

        if let Some(rest) = url.strip_prefix("sqlite://") {
            return Ok(match rest {
                "" | ":memory:" => Self::Memory,
                path => Self::File(PathBuf::from(path)),
            });
        }

        if let Some((scheme, _)) = url.split_once("://") {
            return Err(HotflowError::Config(format!(
                "unsupported database URL scheme `{scheme}`; only sqlite is supported"
            )));
        }

        Ok(Self::File(PathBuf::from(url)))
    }
}

/// Map a tokio-rusqlite error into a storage error.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HotflowError {
    HotflowError::Storage {
        source: Box::new(e),
    }
}

/// Database handle wrapping the background connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
    location: DatabaseLocation,
}

impl Database {
    /// Open the database a connection string points at, apply PRAGMAs and run
    /// pending migrations.
    pub async fn open(url: &str) -> Result<Self, HotflowError> {
        Self::open_location(DatabaseLocation::parse(url)?).await
    }

    /// Open a database at an already-parsed location.
    pub async fn open_location(location: DatabaseLocation) -> Result<Self, HotflowError> {
        let conn = match &location {
            DatabaseLocation::Memory => tokio_rusqlite::Connection::open_in_memory().await,
            DatabaseLocation::File(path) => tokio_rusqlite::Connection::open(path.clone()).await,
        }
        .map_err(|e| HotflowError::Storage {
            source: Box::new(e),
        })?;

        let file_backed = matches!(location, DatabaseLocation::File(_));
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if file_backed {
                conn.execute_batch(
                    "PRAGMA journal_mode = WAL;
                     PRAGMA synchronous = NORMAL;
                     PRAGMA busy_timeout = 5000;",
                )?;
            }
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        let applied = conn
            .call(|conn| crate::migrations::run_migrations(conn))
            .await
            .map_err(|e| HotflowError::Storage {
                source: format!("migration failed: {e}").into(),
            })?;

        debug!(location = ?location, applied, "database opened");
        Ok(Self { conn, location })
    }

    /// The underlying connection, for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    pub fn location(&self) -> &DatabaseLocation {
        &self.location
    }

    /// Flush the WAL into the main database file. A no-op in memory.
    pub async fn checkpoint(&self) -> Result<(), HotflowError> {
        if self.location == DatabaseLocation::Memory {
            return Ok(());
        }
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
