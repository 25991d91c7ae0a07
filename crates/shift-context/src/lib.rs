// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context assembly for the coaching pipeline.
//!
//! Turns raw storage snapshots into a [`UserContext`], renders that context
//! into chat/suggestion prompts, and post-processes model replies into
//! selectable options.

pub mod aggregate;
pub mod options;
pub mod prompt;

pub use aggregate::{SUPPORT_MESSAGE, UserContext, aggregate, mood_drop_detected};
pub use options::{parse_options, resolve_choice};
pub use prompt::{
    NO_SUGGESTION_SENTINEL, build_chat_prompt, build_suggestion_prompt, parse_suggestion,
};
