// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile row operations, including the server-held suggestion cooldown.

use chrono::{DateTime, Utc};
use rusqlite::params;
use shift_core::ShiftError;

use crate::database::Database;
use crate::models::Profile;

/// Insert or update a profile row.
pub async fn upsert_profile(db: &Database, profile: &Profile) -> Result<(), ShiftError> {
    let profile = profile.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO profiles (user_id, display_name, streak_count, last_stand_up_at, last_suggestion_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET
                     display_name = excluded.display_name,
                     streak_count = excluded.streak_count,
                     last_stand_up_at = excluded.last_stand_up_at,
                     last_suggestion_at = excluded.last_suggestion_at",
                params![
                    profile.user_id,
                    profile.display_name,
                    profile.streak_count,
                    profile.last_stand_up_at,
                    profile.last_suggestion_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a profile by user ID.
pub async fn get_profile(db: &Database, user_id: &str) -> Result<Option<Profile>, ShiftError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, display_name, streak_count, last_stand_up_at, last_suggestion_at
                 FROM profiles WHERE user_id = ?1",
            )?;
            let result = stmt.query_row(params![user_id], |row| {
                Ok(Profile {
                    user_id: row.get(0)?,
                    display_name: row.get(1)?,
                    streak_count: row.get(2)?,
                    last_stand_up_at: row.get(3)?,
                    last_suggestion_at: row.get(4)?,
                })
            });
            match result {
                Ok(profile) => Ok(Some(profile)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record the time a suggestion was generated for `user_id`.
///
/// Creates the profile row if it does not exist yet, so the cooldown
/// holds even for users who have never completed a stand-up.
pub async fn record_suggestion_time(
    db: &Database,
    user_id: &str,
    at: DateTime<Utc>,
) -> Result<(), ShiftError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO profiles (user_id, streak_count, last_suggestion_at)
                 VALUES (?1, 0, ?2)
                 ON CONFLICT(user_id) DO UPDATE SET last_suggestion_at = excluded.last_suggestion_at",
                params![user_id, at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
