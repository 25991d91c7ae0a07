// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context aggregation: raw repository output to a normalized [`UserContext`]
//! with derived coaching signals.
//!
//! Aggregation is a pure function: the clock is injected, malformed or
//! missing optional fields default to empty/zero, and identical input
//! always yields identical output.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use shift_core::types::{ContextSnapshot, Goal, Hurdle, StandUp};

/// The mood series never carries more than this many entries,
/// regardless of what the repository returned.
const MAX_MOOD_ENTRIES: usize = 5;

/// Normalized per-user context consumed by the prompt builder and mirrored
/// into API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserContext {
    pub user_id: String,
    /// Mental-health scores, most recent first, at most five entries.
    pub recent_moods: Vec<i64>,
    /// Wins text from the latest stand-up, if any.
    pub recent_wins: Option<String>,
    /// Focus text from the latest stand-up, if any.
    pub current_focus: Option<String>,
    /// Incomplete goals with their sub-goals.
    pub goals: Vec<Goal>,
    /// Incomplete hurdles with their solutions.
    pub hurdles: Vec<Hurdle>,
    /// Titles of goals where every sub-goal is incomplete and the goal is
    /// older than the stagnation window.
    pub stagnant_goals: Vec<String>,
    /// Titles of hurdles with zero solutions.
    pub unaddressed_hurdles: Vec<String>,
    pub streak_count: i64,
    pub last_stand_up_at: Option<DateTime<Utc>>,
}

/// Assemble a [`UserContext`] from a repository snapshot.
///
/// `now` drives the stagnation check only; it is a parameter so tests
/// can pin it.
pub fn aggregate(
    snapshot: &ContextSnapshot,
    user_id: &str,
    now: DateTime<Utc>,
    stagnant_after_days: i64,
) -> UserContext {
    let latest = snapshot.stand_ups.first();

    let stagnant_cutoff = now - Duration::days(stagnant_after_days);
    let stagnant_goals = snapshot
        .goals
        .iter()
        .filter(|g| g.created_at < stagnant_cutoff && g.sub_goals.iter().all(|sg| !sg.completed))
        .map(|g| g.title.clone())
        .collect();

    let unaddressed_hurdles = snapshot
        .hurdles
        .iter()
        .filter(|h| h.solutions.is_empty())
        .map(|h| h.title.clone())
        .collect();

    UserContext {
        user_id: user_id.to_string(),
        recent_moods: snapshot
            .stand_ups
            .iter()
            .take(MAX_MOOD_ENTRIES)
            .map(|s| s.mental_health)
            .collect(),
        recent_wins: latest.and_then(|s| s.wins.clone()),
        current_focus: latest.and_then(|s| s.focus.clone()),
        goals: snapshot.goals.clone(),
        hurdles: snapshot.hurdles.clone(),
        stagnant_goals,
        unaddressed_hurdles,
        streak_count: snapshot.profile.as_ref().map(|p| p.streak_count).unwrap_or(0),
        last_stand_up_at: snapshot
            .profile
            .as_ref()
            .and_then(|p| p.last_stand_up_at)
            .or_else(|| latest.map(|s| s.created_at)),
    }
}

/// Detects a same-day mood drop that warrants a templated support message
/// instead of a model-generated reply.
///
/// Fires when the two most recent stand-ups are both from `today`, the
/// latest mental-health score is below 5, and it sits at least 2 points
/// under the prior same-day score.
pub fn mood_drop_detected(stand_ups: &[StandUp], today: NaiveDate) -> bool {
    let (Some(latest), Some(prior)) = (stand_ups.first(), stand_ups.get(1)) else {
        return false;
    };
    latest.created_at.date_naive() == today
        && prior.created_at.date_naive() == today
        && latest.mental_health < 5
        && prior.mental_health - latest.mental_health >= 2
}

/// Fixed support message returned on the mood-drop branch.
pub const SUPPORT_MESSAGE: &str = "I noticed today has felt heavier than earlier. That's okay - \
    dips happen, and they don't undo your progress. Be gentle with yourself: pick one small, \
    kind thing you can do for yourself right now, and let the rest wait.";

#[cfg(test)]
mod tests {
    use super::*;
    use shift_core::types::{Frequency, Profile, SubGoal};

    fn stand_up(id: &str, score: i64, at: DateTime<Utc>) -> StandUp {
        StandUp {
            id: id.to_string(),
            user_id: "u".to_string(),
            mental_health: score,
            wins: Some("small win".to_string()),
            focus: Some("deep work".to_string()),
            hurdles: None,
            created_at: at,
        }
    }

    fn goal(id: &str, created_days_ago: i64, now: DateTime<Utc>, sub_completed: &[bool]) -> Goal {
        Goal {
            id: id.to_string(),
            user_id: "u".to_string(),
            title: format!("goal {id}"),
            deadline: None,
            completed: false,
            created_at: now - Duration::days(created_days_ago),
            sub_goals: sub_completed
                .iter()
                .enumerate()
                .map(|(i, &completed)| SubGoal {
                    id: format!("{id}-{i}"),
                    goal_id: id.to_string(),
                    title: format!("step {i}"),
                    frequency: Frequency::Daily,
                    completed,
                })
                .collect(),
        }
    }

    fn hurdle(id: &str, now: DateTime<Utc>, solutions: usize) -> Hurdle {
        Hurdle {
            id: id.to_string(),
            user_id: "u".to_string(),
            title: format!("hurdle {id}"),
            completed: false,
            created_at: now - Duration::days(1),
            solutions: (0..solutions)
                .map(|i| shift_core::types::Solution {
                    id: format!("{id}-s{i}"),
                    hurdle_id: id.to_string(),
                    title: format!("fix {i}"),
                    frequency: Frequency::AsNeeded,
                    completed: false,
                })
                .collect(),
        }
    }

    #[test]
    fn ten_day_old_goal_with_incomplete_sub_goals_is_stagnant() {
        let now = Utc::now();
        let snapshot = ContextSnapshot {
            goals: vec![
                goal("old", 10, now, &[false, false]),
                goal("new", 1, now, &[false, false]),
            ],
            ..Default::default()
        };

        let ctx = aggregate(&snapshot, "u", now, 7);
        assert_eq!(ctx.stagnant_goals, vec!["goal old".to_string()]);
    }

    #[test]
    fn goal_with_any_completed_sub_goal_is_not_stagnant() {
        let now = Utc::now();
        let snapshot = ContextSnapshot {
            goals: vec![goal("old", 10, now, &[false, true])],
            ..Default::default()
        };

        let ctx = aggregate(&snapshot, "u", now, 7);
        assert!(ctx.stagnant_goals.is_empty());
    }

    #[test]
    fn hurdles_without_solutions_are_unaddressed() {
        let now = Utc::now();
        let snapshot = ContextSnapshot {
            hurdles: vec![hurdle("bare", now, 0), hurdle("planned", now, 2)],
            ..Default::default()
        };

        let ctx = aggregate(&snapshot, "u", now, 7);
        assert_eq!(ctx.unaddressed_hurdles, vec!["hurdle bare".to_string()]);
    }

    #[test]
    fn mood_series_keeps_order_and_caps_at_five() {
        let now = Utc::now();
        let snapshot = ContextSnapshot {
            stand_ups: (0..7)
                .map(|i| stand_up(&format!("s{i}"), 3 + i, now - Duration::days(i)))
                .collect(),
            ..Default::default()
        };

        let ctx = aggregate(&snapshot, "u", now, 7);
        assert_eq!(ctx.recent_moods, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn wins_and_focus_come_from_latest_stand_up() {
        let now = Utc::now();
        let mut latest = stand_up("s0", 6, now);
        latest.wins = Some("ran 5k".to_string());
        latest.focus = Some("rest".to_string());
        let snapshot = ContextSnapshot {
            stand_ups: vec![latest, stand_up("s1", 4, now - Duration::days(1))],
            ..Default::default()
        };

        let ctx = aggregate(&snapshot, "u", now, 7);
        assert_eq!(ctx.recent_wins.as_deref(), Some("ran 5k"));
        assert_eq!(ctx.current_focus.as_deref(), Some("rest"));
    }

    #[test]
    fn empty_snapshot_yields_zeroed_context() {
        let ctx = aggregate(&ContextSnapshot::default(), "u", Utc::now(), 7);
        assert!(ctx.recent_moods.is_empty());
        assert!(ctx.recent_wins.is_none());
        assert!(ctx.goals.is_empty());
        assert_eq!(ctx.streak_count, 0);
        assert!(ctx.last_stand_up_at.is_none());
    }

    #[test]
    fn aggregation_is_idempotent_with_pinned_clock() {
        let now = Utc::now();
        let snapshot = ContextSnapshot {
            goals: vec![goal("g", 10, now, &[false])],
            hurdles: vec![hurdle("h", now, 0)],
            stand_ups: vec![stand_up("s", 5, now)],
            profile: Some(Profile {
                user_id: "u".to_string(),
                display_name: None,
                streak_count: 3,
                last_stand_up_at: Some(now),
                last_suggestion_at: None,
            }),
        };

        let a = aggregate(&snapshot, "u", now, 7);
        let b = aggregate(&snapshot, "u", now, 7);
        assert_eq!(a, b);
    }

    fn midday() -> DateTime<Utc> {
        use chrono::TimeZone;
        Utc.with_ymd_and_hms(2026, 3, 10, 15, 0, 0).unwrap()
    }

    #[test]
    fn same_day_drop_below_five_triggers_support() {
        let now = midday();
        let today = now.date_naive();
        let stand_ups = vec![
            stand_up("later", 3, now),
            stand_up("earlier", 6, now - Duration::hours(4)),
        ];
        assert!(mood_drop_detected(&stand_ups, today));
    }

    #[test]
    fn small_drop_or_high_score_does_not_trigger_support() {
        let now = midday();
        let today = now.date_naive();

        // Latest score not below 5.
        let stand_ups = vec![
            stand_up("later", 5, now),
            stand_up("earlier", 6, now - Duration::hours(4)),
        ];
        assert!(!mood_drop_detected(&stand_ups, today));

        // Drop of only 1 point.
        let stand_ups = vec![
            stand_up("later", 4, now),
            stand_up("earlier", 5, now - Duration::hours(4)),
        ];
        assert!(!mood_drop_detected(&stand_ups, today));
    }

    #[test]
    fn prior_stand_up_from_yesterday_does_not_trigger_support() {
        let now = midday();
        let today = now.date_naive();
        let stand_ups = vec![
            stand_up("later", 3, now),
            stand_up("yesterday", 7, now - Duration::days(1)),
        ];
        assert!(!mood_drop_detected(&stand_ups, today));
    }

    #[test]
    fn single_stand_up_never_triggers_support() {
        let now = Utc::now();
        let stand_ups = vec![stand_up("only", 2, now)];
        assert!(!mood_drop_detected(&stand_ups, now.date_naive()));
    }
}
