// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Shift coaching service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Shift configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShiftConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Completion endpoint settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Coaching pipeline settings.
    #[serde(default)]
    pub coach: CoachConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the coach persona, interpolated into prompts.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "shift".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Completion endpoint configuration (OpenAI-style chat completions).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` requires the SHIFT_OPENAI_API_KEY environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the chat-completions endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature, fixed for both chat and suggestion calls.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Max tokens for chat replies.
    #[serde(default = "default_chat_max_tokens")]
    pub chat_max_tokens: u32,

    /// Max tokens for proactive suggestions.
    #[serde(default = "default_suggest_max_tokens")]
    pub suggest_max_tokens: u32,

    /// Bound on each outbound request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            chat_max_tokens: default_chat_max_tokens(),
            suggest_max_tokens: default_suggest_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_chat_max_tokens() -> u32 {
    300
}

fn default_suggest_max_tokens() -> u32 {
    150
}

fn default_timeout_secs() -> u64 {
    30
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("shift").join("shift.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("shift.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

/// Coaching pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CoachConfig {
    /// Minimum gap between generated suggestions, per user, in minutes.
    #[serde(default = "default_suggestion_cooldown_mins")]
    pub suggestion_cooldown_mins: i64,

    /// A goal with no completed sub-goals counts as stagnant after this many days.
    #[serde(default = "default_stagnant_after_days")]
    pub stagnant_after_days: i64,

    /// Maximum incomplete goals fetched into context.
    #[serde(default = "default_max_goals")]
    pub max_goals: u32,

    /// Maximum incomplete hurdles fetched into context.
    #[serde(default = "default_max_hurdles")]
    pub max_hurdles: u32,

    /// Maximum recent stand-ups fetched into context.
    #[serde(default = "default_max_stand_ups")]
    pub max_stand_ups: u32,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            suggestion_cooldown_mins: default_suggestion_cooldown_mins(),
            stagnant_after_days: default_stagnant_after_days(),
            max_goals: default_max_goals(),
            max_hurdles: default_max_hurdles(),
            max_stand_ups: default_max_stand_ups(),
        }
    }
}

fn default_suggestion_cooldown_mins() -> i64 {
    30
}

fn default_stagnant_after_days() -> i64 {
    7
}

fn default_max_goals() -> u32 {
    3
}

fn default_max_hurdles() -> u32 {
    3
}

fn default_max_stand_ups() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ShiftConfig::default();
        assert_eq!(config.agent.name, "shift");
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.openai.temperature, 0.7);
        assert_eq!(config.openai.chat_max_tokens, 300);
        assert_eq!(config.openai.suggest_max_tokens, 150);
        assert_eq!(config.openai.timeout_secs, 30);
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.coach.suggestion_cooldown_mins, 30);
        assert_eq!(config.coach.stagnant_after_days, 7);
        assert_eq!(config.coach.max_goals, 3);
        assert_eq!(config.coach.max_hurdles, 3);
        assert_eq!(config.coach.max_stand_ups, 5);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml_str = r#"
[openai]
modle = "gpt-4o-mini"
"#;
        let result = toml::from_str::<ShiftConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[server]
port = 9000
"#;
        let config: ShiftConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.openai.model, "gpt-4o-mini");
    }
}
