// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shift serve` command implementation.
//!
//! Opens the SQLite store, builds the completion client, and runs the
//! coaching HTTP server until the process is stopped.

use shift_config::ShiftConfig;
use shift_core::ShiftError;
use shift_gateway::{CoachSettings, CoachState, ServerConfig, start_server};
use shift_openai::OpenAiClient;
use shift_storage::{Database, SnapshotLimits};
use tracing::info;

/// Runs the `shift serve` command.
pub async fn run_serve(config: ShiftConfig) -> Result<(), ShiftError> {
    init_tracing(&config.agent.log_level);

    info!("starting shift serve");

    let api_key = config.openai.api_key.clone().ok_or_else(|| {
        ShiftError::Config(
            "openai.api_key is not set; add it to shift.toml or export SHIFT_OPENAI_API_KEY"
                .to_string(),
        )
    })?;

    let db = Database::open_with_options(&config.storage.database_path, config.storage.wal_mode)
        .await?;
    info!(path = %config.storage.database_path, "database ready");

    let client = OpenAiClient::new(
        api_key,
        config.openai.model.clone(),
        config.openai.base_url.clone(),
        config.openai.timeout_secs,
    )?;

    let state = CoachState {
        db,
        client,
        settings: CoachSettings {
            coach_name: config.agent.name.clone(),
            temperature: config.openai.temperature,
            chat_max_tokens: config.openai.chat_max_tokens,
            suggest_max_tokens: config.openai.suggest_max_tokens,
            suggestion_cooldown_mins: config.coach.suggestion_cooldown_mins,
            stagnant_after_days: config.coach.stagnant_after_days,
            limits: SnapshotLimits {
                max_goals: config.coach.max_goals,
                max_hurdles: config.coach.max_hurdles,
                max_stand_ups: config.coach.max_stand_ups,
            },
        },
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    start_server(&server_config, state).await
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shift={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
