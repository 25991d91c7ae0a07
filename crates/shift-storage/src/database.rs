// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use shift_core::ShiftError;

/// Handle to the SQLite database backing the coaching pipeline.
///
/// Cheap to clone; all clones share the same background connection.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (or creates) the database at `path`, applies PRAGMAs, and runs
    /// pending migrations. WAL mode is enabled by default.
    pub async fn open(path: &str) -> Result<Self, ShiftError> {
        Self::open_with_options(path, true).await
    }

    /// Opens the database with explicit control over WAL mode.
    pub async fn open_with_options(path: &str, wal_mode: bool) -> Result<Self, ShiftError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ShiftError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_sql_err)?;

        let setup = conn
            .call(move |conn| -> Result<(), ShiftError> {
                if wal_mode {
                    conn.pragma_update(None, "journal_mode", "WAL")
                        .map_err(map_sql_err)?;
                }
                conn.pragma_update(None, "foreign_keys", "ON")
                    .map_err(map_sql_err)?;
                conn.pragma_update(None, "busy_timeout", 5000)
                    .map_err(map_sql_err)?;
                crate::migrations::run_migrations(conn)
            })
            .await;
        match setup {
            Ok(()) => {}
            Err(tokio_rusqlite::Error::Error(e)) => return Err(e),
            Err(e) => {
                return Err(ShiftError::Storage {
                    source: Box::new(e),
                });
            }
        }

        tracing::debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// Returns the shared background connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Closes the background connection, flushing pending work.
    ///
    /// Other clones of this handle become unusable afterwards.
    pub async fn close(self) -> Result<(), ShiftError> {
        self.conn.close().await.map_err(map_tr_err)
    }
}

/// Maps a tokio-rusqlite error into the workspace error type.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> ShiftError {
    ShiftError::Storage {
        source: Box::new(e),
    }
}

/// Maps a raw rusqlite error into the workspace error type.
pub(crate) fn map_sql_err(e: rusqlite::Error) -> ShiftError {
    ShiftError::Storage {
        source: Box::new(e),
    }
}
