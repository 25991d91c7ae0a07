// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stand-up operations, including streak maintenance at record time.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use shift_core::ShiftError;

use crate::database::Database;
use crate::models::StandUp;

/// Record a stand-up and update the user's streak and profile timestamps.
///
/// Streak rule: previous stand-up yesterday -> streak + 1; previous
/// stand-up today -> streak unchanged; anything else -> reset to 1.
/// Runs in a single transaction so the stand-up and profile never diverge.
pub async fn create_stand_up(db: &Database, stand_up: &StandUp) -> Result<(), ShiftError> {
    let stand_up = stand_up.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let previous: Option<DateTime<Utc>> = tx
                .query_row(
                    "SELECT created_at FROM stand_ups
                     WHERE user_id = ?1 ORDER BY created_at DESC LIMIT 1",
                    params![stand_up.user_id],
                    |row| row.get(0),
                )
                .optional()?;

            let current_streak: i64 = tx
                .query_row(
                    "SELECT streak_count FROM profiles WHERE user_id = ?1",
                    params![stand_up.user_id],
                    |row| row.get(0),
                )
                .optional()?
                .unwrap_or(0);

            let today = stand_up.created_at.date_naive();
            let new_streak = match previous.map(|p| p.date_naive()) {
                Some(prev) if prev == today => current_streak.max(1),
                Some(prev) if today.signed_duration_since(prev).num_days() == 1 => {
                    current_streak + 1
                }
                _ => 1,
            };

            tx.execute(
                "INSERT INTO stand_ups (id, user_id, mental_health, wins, focus, hurdles, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    stand_up.id,
                    stand_up.user_id,
                    stand_up.mental_health,
                    stand_up.wins,
                    stand_up.focus,
                    stand_up.hurdles,
                    stand_up.created_at,
                ],
            )?;

            tx.execute(
                "INSERT INTO profiles (user_id, streak_count, last_stand_up_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET
                     streak_count = excluded.streak_count,
                     last_stand_up_at = excluded.last_stand_up_at",
                params![stand_up.user_id, new_streak, stand_up.created_at],
            )?;

            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List the most recent stand-ups for a user, newest first.
pub async fn list_recent_stand_ups(
    db: &Database,
    user_id: &str,
    limit: u32,
) -> Result<Vec<StandUp>, ShiftError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, mental_health, wins, focus, hurdles, created_at
                 FROM stand_ups WHERE user_id = ?1
                 ORDER BY created_at DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit], |row| {
                Ok(StandUp {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    mental_health: row.get(2)?,
                    wins: row.get(3)?,
                    focus: row.get(4)?,
                    hurdles: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?;
            let mut stand_ups = Vec::new();
            for row in rows {
                stand_ups.push(row?);
            }
            Ok(stand_ups)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
