// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and sensible numeric ranges.

use crate::diagnostic::ConfigError;
use crate::model::ShiftConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ShiftConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let host = config.server.host.trim();
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !config.openai.base_url.starts_with("http://") && !config.openai.base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!(
                "openai.base_url must be an http(s) URL, got `{}`",
                config.openai.base_url
            ),
        });
    }

    if !(0.0..=2.0).contains(&config.openai.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "openai.temperature must be between 0.0 and 2.0, got {}",
                config.openai.temperature
            ),
        });
    }

    if config.openai.chat_max_tokens == 0 || config.openai.suggest_max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.chat_max_tokens and openai.suggest_max_tokens must be positive"
                .to_string(),
        });
    }

    if config.openai.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.timeout_secs must be positive".to_string(),
        });
    }

    if config.coach.suggestion_cooldown_mins < 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "coach.suggestion_cooldown_mins must be non-negative, got {}",
                config.coach.suggestion_cooldown_mins
            ),
        });
    }

    if config.coach.stagnant_after_days < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "coach.stagnant_after_days must be at least 1, got {}",
                config.coach.stagnant_after_days
            ),
        });
    }

    if config.coach.max_stand_ups < 2 {
        // The mood-drop signal compares the two most recent stand-ups.
        errors.push(ConfigError::Validation {
            message: format!(
                "coach.max_stand_ups must be at least 2, got {}",
                config.coach.max_stand_ups
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
