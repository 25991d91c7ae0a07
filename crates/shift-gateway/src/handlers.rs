// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the coaching REST API.
//!
//! Handles POST /v1/chat, POST /v1/suggest, the domain write paths, and
//! GET /health.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shift_context::{
    SUPPORT_MESSAGE, UserContext, aggregate, build_chat_prompt, build_suggestion_prompt,
    mood_drop_detected, parse_options, parse_suggestion, resolve_choice,
};
use shift_core::{Frequency, Goal, Hurdle, Profile, ShiftError, Solution, StandUp, SubGoal};
use shift_storage::queries::{goals, hurdles, profiles, stand_ups};
use shift_storage::snapshot::fetch_context_snapshot;

use crate::server::CoachState;

/// Request body for POST /v1/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's latest message.
    pub message: String,
    /// User the conversation belongs to.
    pub user_id: String,
    /// Option text the user picked from the previous reply, if known.
    #[serde(default)]
    pub last_choice: Option<String>,
    /// Option list from the previous reply, echoed back so a purely
    /// numeric message can be resolved server-side.
    #[serde(default)]
    pub prior_options: Vec<String>,
}

/// Response body for POST /v1/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The coach's reply text.
    pub reply: String,
    /// Selectable options parsed from a numbered-list reply (may be empty).
    pub options: Vec<String>,
    /// The aggregated context the reply was grounded in.
    pub context: UserContext,
}

/// Request body for POST /v1/suggest.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    /// User to generate a suggestion for.
    pub user_id: String,
}

/// Response body for POST /v1/suggest.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    /// The generated suggestion, or null when cooled down or the model
    /// declined.
    pub suggestion: Option<String>,
    /// The aggregated context, absent when the cooldown short-circuited.
    pub context: Option<UserContext>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short error category.
    pub error: String,
    /// Human-readable detail.
    pub details: String,
}

fn not_found(details: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "not_found".to_string(),
            details: details.into(),
        }),
    )
        .into_response()
}

fn bad_request(details: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "invalid_request".to_string(),
            details: details.into(),
        }),
    )
        .into_response()
}

/// Maps a pipeline error onto the API's status taxonomy: validation
/// failures are 400, completion-endpoint failures are 502, everything
/// else is 500.
fn error_response(err: ShiftError) -> Response {
    let (status, error) = match &err {
        ShiftError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
        ShiftError::Provider { .. } | ShiftError::Timeout { .. } => {
            (StatusCode::BAD_GATEWAY, "completion_failed")
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };
    tracing::error!(error = %err, status = %status, "request failed");
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            details: err.to_string(),
        }),
    )
        .into_response()
}

/// POST /v1/chat
///
/// Assembles the user's context, threads in the resolved prior choice,
/// and returns the model's reply with any parsed options. A same-day
/// mood drop short-circuits to a fixed support message without calling
/// the model.
pub async fn post_chat(
    State(state): State<CoachState>,
    Json(body): Json<ChatRequest>,
) -> Response {
    if body.user_id.trim().is_empty() {
        return bad_request("user_id must not be empty");
    }
    if body.message.trim().is_empty() {
        return bad_request("message must not be empty");
    }

    let now = Utc::now();
    let snapshot = fetch_context_snapshot(&state.db, &body.user_id, state.settings.limits).await;
    let context = aggregate(
        &snapshot,
        &body.user_id,
        now,
        state.settings.stagnant_after_days,
    );

    if mood_drop_detected(&snapshot.stand_ups, now.date_naive()) {
        tracing::info!(user_id = %body.user_id, "mood drop detected, returning support message");
        return (
            StatusCode::OK,
            Json(ChatResponse {
                reply: SUPPORT_MESSAGE.to_string(),
                options: Vec::new(),
                context,
            }),
        )
            .into_response();
    }

    // An explicit last_choice wins; otherwise a purely numeric message
    // resolves against the echoed prior options.
    let last_choice = body
        .last_choice
        .or_else(|| resolve_choice(&body.prior_options, &body.message));

    let messages = build_chat_prompt(
        &state.settings.coach_name,
        &context,
        &body.message,
        last_choice.as_deref(),
    );

    let reply = match state
        .client
        .complete_text(
            messages,
            state.settings.temperature,
            state.settings.chat_max_tokens,
        )
        .await
    {
        Ok(reply) => reply,
        Err(e) => return error_response(e),
    };

    let options = parse_options(&reply);

    (
        StatusCode::OK,
        Json(ChatResponse {
            reply,
            options,
            context,
        }),
    )
        .into_response()
}

/// POST /v1/suggest
///
/// Generates a proactive suggestion unless the per-user cooldown is
/// still running. A cooled-down request performs no context queries and
/// no completion call.
pub async fn post_suggest(
    State(state): State<CoachState>,
    Json(body): Json<SuggestRequest>,
) -> Response {
    if body.user_id.trim().is_empty() {
        return bad_request("user_id must not be empty");
    }

    let now = Utc::now();

    // Cooldown gate first. A profile read failure degrades to "no
    // profile" rather than blocking the suggestion path.
    let profile = match profiles::get_profile(&state.db, &body.user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(user_id = %body.user_id, error = %e, "cooldown profile read failed");
            None
        }
    };
    if let Some(last) = profile.as_ref().and_then(|p| p.last_suggestion_at) {
        let cooldown = Duration::minutes(state.settings.suggestion_cooldown_mins);
        if now - last < cooldown {
            tracing::debug!(user_id = %body.user_id, "suggestion cooldown active");
            return (
                StatusCode::OK,
                Json(SuggestResponse {
                    suggestion: None,
                    context: None,
                }),
            )
                .into_response();
        }
    }

    let snapshot = fetch_context_snapshot(&state.db, &body.user_id, state.settings.limits).await;
    let context = aggregate(
        &snapshot,
        &body.user_id,
        now,
        state.settings.stagnant_after_days,
    );

    let messages = build_suggestion_prompt(&state.settings.coach_name, &context);
    let reply = match state
        .client
        .complete_text(
            messages,
            state.settings.temperature,
            state.settings.suggest_max_tokens,
        )
        .await
    {
        Ok(reply) => reply,
        Err(e) => return error_response(e),
    };

    let suggestion = parse_suggestion(&reply);
    if suggestion.is_some() {
        if let Err(e) = profiles::record_suggestion_time(&state.db, &body.user_id, now).await {
            tracing::warn!(user_id = %body.user_id, error = %e, "failed to record suggestion time");
        }
    }

    (
        StatusCode::OK,
        Json(SuggestResponse {
            suggestion,
            context: Some(context),
        }),
    )
        .into_response()
}

/// GET /health
///
/// Returns health status of the service.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// --- Domain write paths ---

/// Request body for POST /v1/users.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Request body for POST /v1/stand-ups.
#[derive(Debug, Deserialize)]
pub struct StandUpRequest {
    pub user_id: String,
    /// Mood score, 1 through 10.
    pub mental_health: i64,
    #[serde(default)]
    pub wins: Option<String>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub hurdles: Option<String>,
}

/// A sub-goal or solution item within a creation request.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub title: String,
    #[serde(default)]
    pub frequency: Frequency,
}

/// Request body for POST /v1/goals.
#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub sub_goals: Vec<ItemRequest>,
}

/// Request body for POST /v1/hurdles.
#[derive(Debug, Deserialize)]
pub struct HurdleRequest {
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub solutions: Vec<ItemRequest>,
}

/// Response body for creation endpoints.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// POST /v1/users
///
/// Creates or renames a profile. Streak and timestamps on an existing
/// row are preserved, and an absent display_name keeps the current one.
pub async fn post_user(State(state): State<CoachState>, Json(body): Json<UserRequest>) -> Response {
    if body.user_id.trim().is_empty() {
        return bad_request("user_id must not be empty");
    }

    let existing = match profiles::get_profile(&state.db, &body.user_id).await {
        Ok(existing) => existing,
        Err(e) => return error_response(e),
    };
    let profile = match existing {
        Some(mut profile) => {
            if body.display_name.is_some() {
                profile.display_name = body.display_name;
            }
            profile
        }
        None => Profile {
            user_id: body.user_id.clone(),
            display_name: body.display_name,
            streak_count: 0,
            last_stand_up_at: None,
            last_suggestion_at: None,
        },
    };

    match profiles::upsert_profile(&state.db, &profile).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(CreatedResponse { id: body.user_id }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /v1/stand-ups
///
/// Records a daily check-in and maintains the profile streak.
pub async fn post_stand_up(
    State(state): State<CoachState>,
    Json(body): Json<StandUpRequest>,
) -> Response {
    if body.user_id.trim().is_empty() {
        return bad_request("user_id must not be empty");
    }
    if !(1..=10).contains(&body.mental_health) {
        return bad_request("mental_health must be between 1 and 10");
    }

    let stand_up = StandUp {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: body.user_id,
        mental_health: body.mental_health,
        wins: body.wins,
        focus: body.focus,
        hurdles: body.hurdles,
        created_at: Utc::now(),
    };

    match stand_ups::create_stand_up(&state.db, &stand_up).await {
        Ok(()) => (StatusCode::CREATED, Json(CreatedResponse { id: stand_up.id })).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /v1/goals
///
/// Creates a goal with its sub-goals in one transaction.
pub async fn post_goal(State(state): State<CoachState>, Json(body): Json<GoalRequest>) -> Response {
    if body.user_id.trim().is_empty() {
        return bad_request("user_id must not be empty");
    }
    if body.title.trim().is_empty() {
        return bad_request("title must not be empty");
    }

    let goal_id = uuid::Uuid::new_v4().to_string();
    let goal = Goal {
        id: goal_id.clone(),
        user_id: body.user_id,
        title: body.title,
        deadline: body.deadline,
        completed: false,
        created_at: Utc::now(),
        sub_goals: body
            .sub_goals
            .into_iter()
            .map(|item| SubGoal {
                id: uuid::Uuid::new_v4().to_string(),
                goal_id: goal_id.clone(),
                title: item.title,
                frequency: item.frequency,
                completed: false,
            })
            .collect(),
    };

    match goals::create_goal(&state.db, &goal).await {
        Ok(()) => (StatusCode::CREATED, Json(CreatedResponse { id: goal_id })).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /v1/hurdles
///
/// Creates a hurdle with its solutions in one transaction.
pub async fn post_hurdle(
    State(state): State<CoachState>,
    Json(body): Json<HurdleRequest>,
) -> Response {
    if body.user_id.trim().is_empty() {
        return bad_request("user_id must not be empty");
    }
    if body.title.trim().is_empty() {
        return bad_request("title must not be empty");
    }

    let hurdle_id = uuid::Uuid::new_v4().to_string();
    let hurdle = Hurdle {
        id: hurdle_id.clone(),
        user_id: body.user_id,
        title: body.title,
        completed: false,
        created_at: Utc::now(),
        solutions: body
            .solutions
            .into_iter()
            .map(|item| Solution {
                id: uuid::Uuid::new_v4().to_string(),
                hurdle_id: hurdle_id.clone(),
                title: item.title,
                frequency: item.frequency,
                completed: false,
            })
            .collect(),
    };

    match hurdles::create_hurdle(&state.db, &hurdle).await {
        Ok(()) => (StatusCode::CREATED, Json(CreatedResponse { id: hurdle_id })).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /v1/hurdles/{id}/solutions
///
/// Appends a solution to an existing hurdle, after its current ones.
pub async fn post_solution(
    State(state): State<CoachState>,
    Path(hurdle_id): Path<String>,
    Json(body): Json<ItemRequest>,
) -> Response {
    if body.title.trim().is_empty() {
        return bad_request("title must not be empty");
    }

    match hurdles::hurdle_exists(&state.db, &hurdle_id).await {
        Ok(true) => {}
        Ok(false) => return not_found(format!("no hurdle with id {hurdle_id}")),
        Err(e) => return error_response(e),
    }

    let solution = Solution {
        id: uuid::Uuid::new_v4().to_string(),
        hurdle_id,
        title: body.title,
        frequency: body.frequency,
        completed: false,
    };

    match hurdles::add_solution(&state.db, &solution).await {
        Ok(()) => (StatusCode::CREATED, Json(CreatedResponse { id: solution.id })).into_response(),
        Err(e) => error_response(e),
    }
}
