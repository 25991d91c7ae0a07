// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for operations on storage entities.

pub mod goals;
pub mod hurdles;
pub mod profiles;
pub mod stand_ups;
