// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, timeouts, and transient error retry.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use shift_core::{PromptMessage, ShiftError};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// HTTP client for OpenAI-compatible chat completion endpoints.
///
/// Manages the bearer-token header, connection pooling, a hard request
/// timeout, and retry logic for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    default_model: String,
    max_retries: u32,
    base_url: String,
    timeout: Duration,
}

impl OpenAiClient {
    /// Creates a new chat completions client.
    ///
    /// # Arguments
    /// * `api_key` - API key sent as a bearer token
    /// * `model` - Default model identifier
    /// * `base_url` - Full completions endpoint URL
    /// * `timeout_secs` - Hard cap on the total request duration
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout_secs: u64,
    ) -> Result<Self, ShiftError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| ShiftError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ShiftError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            default_model: model,
            max_retries: 1,
            base_url,
            timeout,
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Sends a completion request and returns the assistant text of the
    /// first choice.
    ///
    /// Builds the request with the client's default model.
    pub async fn complete_text(
        &self,
        messages: Vec<PromptMessage>,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, ShiftError> {
        let request = ChatCompletionRequest {
            model: self.default_model.clone(),
            messages,
            temperature,
            max_tokens,
        };
        let response = self.complete(&request).await?;
        response
            .first_text()
            .map(|s| s.to_string())
            .ok_or_else(|| ShiftError::Provider {
                message: "API response contained no choices".into(),
                source: None,
            })
    }

    /// Sends a completion request and returns the full response.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ShiftError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&self.base_url)
                .json(request)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        ShiftError::Timeout {
                            duration: self.timeout,
                        }
                    } else {
                        ShiftError::Provider {
                            message: format!("HTTP request failed: {e}"),
                            source: Some(Box::new(e)),
                        }
                    }
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| ShiftError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                let completion: ChatCompletionResponse =
                    serde_json::from_str(&body).map_err(|e| ShiftError::Provider {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return Ok(completion);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(ShiftError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(ShiftError::Provider {
                message: error_msg,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| ShiftError::Provider {
            message: "completion request failed after retries".into(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
