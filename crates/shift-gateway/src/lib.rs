// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for the Shift coaching service.
//!
//! Exposes the chat and suggestion pipelines plus the minimal domain
//! write paths over JSON-over-HTTP.

pub mod handlers;
pub mod server;

pub use server::{CoachSettings, CoachState, ServerConfig, build_router, start_server};
