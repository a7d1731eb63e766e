//! Wire types for the OpenAI Chat Completions API

use routinelog_domain::RoutineLogError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/* -------------------------------------------------------------------------- */
/* Request types */
/* -------------------------------------------------------------------------- */

/// Request body for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// One message in a chat-completion conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/* -------------------------------------------------------------------------- */
/* Response types */
/* -------------------------------------------------------------------------- */

/// Successful chat-completion response, reduced to the fields we read.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: String,
}

/// Error envelope returned by the API on non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/* -------------------------------------------------------------------------- */
/* Errors */
/* -------------------------------------------------------------------------- */

/// Failure modes of a single chat-completion call.
#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Quota or rate-limit rejection. The message keeps the raw API wording
    /// so `insufficient_quota` stays detectable downstream.
    #[error("rate limited (HTTP 429): {0}")]
    RateLimit(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("unexpected response shape: {0}")]
    InvalidSchema(String),
}

impl From<OpenAiError> for RoutineLogError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::Network(msg) => RoutineLogError::Network(msg),
            OpenAiError::Api { status, message } => {
                RoutineLogError::Network(format!("API error (status {status}): {message}"))
            }
            OpenAiError::RateLimit(msg) => {
                RoutineLogError::Network(format!("rate limited (HTTP 429): {msg}"))
            }
            OpenAiError::Authentication(msg) => RoutineLogError::Auth(msg),
            OpenAiError::InvalidSchema(msg) => RoutineLogError::Parse(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_conversion_keeps_429_marker() {
        let err = OpenAiError::RateLimit("insufficient_quota".to_string());
        let domain: RoutineLogError = err.into();

        match domain {
            RoutineLogError::Network(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("insufficient_quota"));
            }
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[test]
    fn authentication_converts_to_auth() {
        let err = OpenAiError::Authentication("invalid api key".to_string());
        assert!(matches!(RoutineLogError::from(err), RoutineLogError::Auth(_)));
    }

    #[test]
    fn invalid_schema_converts_to_parse() {
        let err = OpenAiError::InvalidSchema("not json".to_string());
        assert!(matches!(RoutineLogError::from(err), RoutineLogError::Parse(_)));
    }
}
