// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat-completions API request/response types.

use serde::{Deserialize, Serialize};
use shift_core::PromptMessage;

/// A request to the chat completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,

    /// Conversation messages, system prompt first.
    pub messages: Vec<PromptMessage>,

    /// Sampling temperature.
    pub temperature: f64,

    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// A response from the chat completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response identifier.
    pub id: String,

    /// Generated choices; the first one carries the reply.
    pub choices: Vec<Choice>,

    /// Token usage for the request.
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Returns the assistant text of the first choice, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// A single generated choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The assistant message.
    pub message: ChoiceMessage,

    /// Why generation stopped (e.g., "stop", "length").
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message payload inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Message role (always "assistant" in responses).
    pub role: String,

    /// Generated text content.
    #[serde(default)]
    pub content: String,
}

/// Token usage accounting.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Error response body from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Error details within an error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Error type (e.g., "invalid_request_error").
    #[serde(rename = "type", default)]
    pub type_: String,

    /// Human-readable error message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shift_core::PromptMessage;

    #[test]
    fn request_serializes_with_lowercase_roles() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![
                PromptMessage::system("You are a coach."),
                PromptMessage::user("Hello"),
            ],
            temperature: 0.7,
            max_tokens: 300,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 300);
    }

    #[test]
    fn response_first_text_reads_first_choice() {
        let body = serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [
                {"message": {"role": "assistant", "content": "Hi there"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
        });

        let response: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.first_text(), Some("Hi there"));
    }

    #[test]
    fn response_with_no_choices_has_no_text() {
        let body = serde_json::json!({"id": "chatcmpl-2", "choices": []});
        let response: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.first_text(), None);
    }
}
