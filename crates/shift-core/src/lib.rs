// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Shift coaching service.
//!
//! Provides the shared error type and the role-tagged message types used
//! by the prompt builder, the completion client, and the gateway.

pub mod error;
pub mod types;

pub use error::ShiftError;
pub use types::{
    ContextSnapshot, Frequency, Goal, Hurdle, Profile, PromptMessage, Role, Solution, StandUp,
    SubGoal,
};
