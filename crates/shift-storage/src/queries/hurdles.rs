// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hurdle and solution operations.

use std::str::FromStr;

use rusqlite::params;
use shift_core::ShiftError;

use crate::database::Database;
use crate::models::{Frequency, Hurdle, Solution};

/// Insert a hurdle together with its solutions, in one transaction.
pub async fn create_hurdle(db: &Database, hurdle: &Hurdle) -> Result<(), ShiftError> {
    let hurdle = hurdle.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO hurdles (id, user_id, title, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    hurdle.id,
                    hurdle.user_id,
                    hurdle.title,
                    hurdle.completed,
                    hurdle.created_at,
                ],
            )?;
            for (position, solution) in hurdle.solutions.iter().enumerate() {
                tx.execute(
                    "INSERT INTO solutions (id, hurdle_id, title, frequency, completed, position)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        solution.id,
                        hurdle.id,
                        solution.title,
                        solution.frequency.to_string(),
                        solution.completed,
                        position as i64,
                    ],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Attach a solution to an existing hurdle, appended after current ones.
pub async fn add_solution(db: &Database, solution: &Solution) -> Result<(), ShiftError> {
    let solution = solution.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO solutions (id, hurdle_id, title, frequency, completed, position)
                 VALUES (?1, ?2, ?3, ?4, ?5,
                         (SELECT COALESCE(MAX(position) + 1, 0) FROM solutions WHERE hurdle_id = ?2))",
                params![
                    solution.id,
                    solution.hurdle_id,
                    solution.title,
                    solution.frequency.to_string(),
                    solution.completed,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Whether a hurdle with the given id exists.
pub async fn hurdle_exists(db: &Database, id: &str) -> Result<bool, ShiftError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM hurdles WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List incomplete hurdles for a user, oldest first, with nested solutions.
pub async fn list_active_hurdles(
    db: &Database,
    user_id: &str,
    limit: u32,
) -> Result<Vec<Hurdle>, ShiftError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, completed, created_at
                 FROM hurdles WHERE user_id = ?1 AND completed = 0
                 ORDER BY created_at ASC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit], |row| {
                Ok(Hurdle {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    completed: row.get(3)?,
                    created_at: row.get(4)?,
                    solutions: Vec::new(),
                })
            })?;
            let mut hurdles = Vec::new();
            for row in rows {
                hurdles.push(row?);
            }

            let mut sol_stmt = conn.prepare(
                "SELECT id, hurdle_id, title, frequency, completed
                 FROM solutions WHERE hurdle_id = ?1 ORDER BY position ASC",
            )?;
            for hurdle in &mut hurdles {
                let rows = sol_stmt.query_map(params![hurdle.id], |row| {
                    let frequency: String = row.get(3)?;
                    Ok(Solution {
                        id: row.get(0)?,
                        hurdle_id: row.get(1)?,
                        title: row.get(2)?,
                        frequency: Frequency::from_str(&frequency).unwrap_or_default(),
                        completed: row.get(4)?,
                    })
                })?;
                for row in rows {
                    hurdle.solutions.push(row?);
                }
            }

            Ok(hurdles)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
