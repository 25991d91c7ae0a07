// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Shift coaching service.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, typed query functions for the
//! wellness entities, and the fan-out context snapshot read used by the
//! coaching pipeline.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod snapshot;

pub use database::Database;
pub use models::*;
pub use snapshot::{fetch_context_snapshot, SnapshotLimits};
