// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coaching HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the API.

use axum::{
    Router,
    routing::{get, post},
};
use shift_core::ShiftError;
use shift_openai::OpenAiClient;
use shift_storage::{Database, SnapshotLimits};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Coaching pipeline settings shared by the chat and suggest handlers.
#[derive(Debug, Clone)]
pub struct CoachSettings {
    /// Name the coach persona introduces itself with.
    pub coach_name: String,
    /// Sampling temperature for both call sites.
    pub temperature: f64,
    /// Max tokens for conversational replies.
    pub chat_max_tokens: u32,
    /// Max tokens for proactive suggestions.
    pub suggest_max_tokens: u32,
    /// Minimum gap between generated suggestions, per user, in minutes.
    pub suggestion_cooldown_mins: i64,
    /// Goal-stagnation window in days.
    pub stagnant_after_days: i64,
    /// Caps on how much context is fetched per request.
    pub limits: SnapshotLimits,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct CoachState {
    /// SQLite-backed repository.
    pub db: Database,
    /// Chat-completions client.
    pub client: OpenAiClient,
    /// Pipeline settings.
    pub settings: CoachSettings,
}

/// Server bind configuration (mirrors ServerConfig from shift-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the API router with all routes and middleware attached.
pub fn build_router(state: CoachState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/v1/chat", post(handlers::post_chat))
        .route("/v1/suggest", post(handlers::post_suggest))
        .route("/v1/users", post(handlers::post_user))
        .route("/v1/stand-ups", post(handlers::post_stand_up))
        .route("/v1/goals", post(handlers::post_goal))
        .route("/v1/hurdles", post(handlers::post_hurdle))
        .route("/v1/hurdles/{id}/solutions", post(handlers::post_solution))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the coaching HTTP server.
///
/// Binds to the configured host:port and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: CoachState) -> Result<(), ShiftError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ShiftError::Internal(format!("failed to bind server to {addr}: {e}")))?;

    tracing::info!("Coaching server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| ShiftError::Internal(format!("server error: {e}")))?;

    Ok(())
}
