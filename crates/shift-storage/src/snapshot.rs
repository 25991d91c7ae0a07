// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fan-out context fetch: the repository adapter for the coaching pipeline.
//!
//! Issues the four user-scoped reads concurrently and collects partial
//! results: a failed branch degrades to an empty collection with a logged
//! warning instead of aborting the whole request. Both the chat and the
//! suggestion paths share this single policy.

use shift_core::ShiftError;
use tracing::warn;

use crate::database::Database;
use crate::models::ContextSnapshot;
use crate::queries::{goals, hurdles, profiles, stand_ups};

/// Caps on how much of each entity type is pulled into context.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotLimits {
    pub max_goals: u32,
    pub max_hurdles: u32,
    pub max_stand_ups: u32,
}

impl Default for SnapshotLimits {
    fn default() -> Self {
        Self {
            max_goals: 3,
            max_hurdles: 3,
            max_stand_ups: 5,
        }
    }
}

/// Fetch everything the aggregator needs for one user.
///
/// Read-only; never fails. Individual branch failures are logged and
/// replaced with empty data.
pub async fn fetch_context_snapshot(
    db: &Database,
    user_id: &str,
    limits: SnapshotLimits,
) -> ContextSnapshot {
    let (profile, goals, hurdles, stand_ups) = tokio::join!(
        profiles::get_profile(db, user_id),
        goals::list_active_goals(db, user_id, limits.max_goals),
        hurdles::list_active_hurdles(db, user_id, limits.max_hurdles),
        stand_ups::list_recent_stand_ups(db, user_id, limits.max_stand_ups),
    );

    ContextSnapshot {
        profile: tolerate(profile, user_id, "profile").flatten(),
        goals: tolerate(goals, user_id, "goals").unwrap_or_default(),
        hurdles: tolerate(hurdles, user_id, "hurdles").unwrap_or_default(),
        stand_ups: tolerate(stand_ups, user_id, "stand_ups").unwrap_or_default(),
    }
}

/// Collapse a branch failure into `None`, logging the error.
fn tolerate<T>(result: Result<T, ShiftError>, user_id: &str, entity: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(user_id, entity, error = %e, "context fetch branch failed, substituting empty");
            None
        }
    }
}
