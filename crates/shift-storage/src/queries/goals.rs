// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goal and sub-goal operations.

use std::str::FromStr;

use rusqlite::params;
use shift_core::ShiftError;

use crate::database::Database;
use crate::models::{Frequency, Goal, SubGoal};

/// Insert a goal together with its sub-goals, in one transaction.
pub async fn create_goal(db: &Database, goal: &Goal) -> Result<(), ShiftError> {
    let goal = goal.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO goals (id, user_id, title, deadline, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    goal.id,
                    goal.user_id,
                    goal.title,
                    goal.deadline,
                    goal.completed,
                    goal.created_at,
                ],
            )?;
            for (position, sub_goal) in goal.sub_goals.iter().enumerate() {
                tx.execute(
                    "INSERT INTO sub_goals (id, goal_id, title, frequency, completed, position)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        sub_goal.id,
                        goal.id,
                        sub_goal.title,
                        sub_goal.frequency.to_string(),
                        sub_goal.completed,
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

/// List incomplete goals for a user, oldest first, with nested sub-goals.
///
/// The completed filter is pushed into the query; the aggregator never
/// sees finished goals.
pub async fn list_active_goals(
    db: &Database,
    user_id: &str,
    limit: u32,
) -> Result<Vec<Goal>, ShiftError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, deadline, completed, created_at
                 FROM goals WHERE user_id = ?1 AND completed = 0
                 ORDER BY created_at ASC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit], |row| {
                Ok(Goal {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    deadline: row.get(3)?,
                    completed: row.get(4)?,
                    created_at: row.get(5)?,
                    sub_goals: Vec::new(),
                })
            })?;
            let mut goals = Vec::new();
            for row in rows {
                goals.push(row?);
            }

            let mut sub_stmt = conn.prepare(
                "SELECT id, goal_id, title, frequency, completed
                 FROM sub_goals WHERE goal_id = ?1 ORDER BY position ASC",
            )?;
            for goal in &mut goals {
                let rows = sub_stmt.query_map(params![goal.id], |row| {
                    let frequency: String = row.get(3)?;
                    Ok(SubGoal {
                        id: row.get(0)?,
                        goal_id: row.get(1)?,
                        title: row.get(2)?,
                        // Unknown frequency values degrade to the default
                        // rather than failing the whole fetch.
                        frequency: Frequency::from_str(&frequency).unwrap_or_default(),
                        completed: row.get(4)?,
                    })
                })?;
                for row in rows {
                    goal.sub_goals.push(row?);
                }
            }

            Ok(goals)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
