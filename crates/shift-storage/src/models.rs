// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `shift_core::types` for use across
//! crate boundaries. This module re-exports them for convenience within
//! the storage crate.

pub use shift_core::types::{
    ContextSnapshot, Frequency, Goal, Hurdle, Profile, Solution, StandUp, SubGoal,
};
