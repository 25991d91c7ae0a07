// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Shift workspace.
//!
//! The domain records here are the canonical row types read by the storage
//! crate and consumed by the context aggregator. They carry no behavior
//! beyond construction helpers; derived signals live in `shift-context`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role of a message in a completion request or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message sent to the completion endpoint.
///
/// An ordered sequence of these forms the request body; the system
/// message is always first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    /// Creates a system-role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

// --- Domain records ---

/// How often a sub-goal or solution recurs.
///
/// Sub-goals use `Daily`/`Weekly`; solutions may additionally be `AsNeeded`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize, Default,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    AsNeeded,
}

/// Per-user profile row.
///
/// `last_suggestion_at` is the server-held cooldown timestamp: a new
/// suggestion is only generated once the cooldown window has elapsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub display_name: Option<String>,
    pub streak_count: i64,
    pub last_stand_up_at: Option<DateTime<Utc>>,
    pub last_suggestion_at: Option<DateTime<Utc>>,
}

/// A daily check-in record: mood score, prior-day wins, today's focus,
/// anticipated hurdles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandUp {
    pub id: String,
    pub user_id: String,
    /// Mental-health score, 1-10.
    pub mental_health: i64,
    pub wins: Option<String>,
    pub focus: Option<String>,
    pub hurdles: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A tracked goal with its recurring sub-goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub deadline: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub sub_goals: Vec<SubGoal>,
}

/// A recurring task linked to a parent goal (back-reference only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubGoal {
    pub id: String,
    pub goal_id: String,
    pub title: String,
    pub frequency: Frequency,
    pub completed: bool,
}

/// A tracked obstacle with zero or more solutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hurdle {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub solutions: Vec<Solution>,
}

/// A planned response to a hurdle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub id: String,
    pub hurdle_id: String,
    pub title: String,
    pub frequency: Frequency,
    pub completed: bool,
}

/// Raw repository output for one user: the input to the context aggregator.
///
/// Every collection degrades to empty when its fetch fails, so this type
/// is always constructible.
#[derive(Debug, Clone, Default)]
pub struct ContextSnapshot {
    pub profile: Option<Profile>,
    /// Incomplete goals, capped at the configured maximum.
    pub goals: Vec<Goal>,
    /// Incomplete hurdles, capped at the configured maximum.
    pub hurdles: Vec<Hurdle>,
    /// Most-recent stand-ups, newest first, capped at the configured maximum.
    pub stand_ups: Vec<StandUp>,
}
