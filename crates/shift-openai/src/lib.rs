// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions provider adapter.

pub mod client;
pub mod types;

pub use client::OpenAiClient;
pub use types::{ChatCompletionRequest, ChatCompletionResponse};
