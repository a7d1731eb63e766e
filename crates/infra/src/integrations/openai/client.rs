//! OpenAI chat-completions client implementing the advisor gateway.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use reqwest::Method;
use routinelog_core::advice::composer;
use routinelog_core::AdvisorGateway;
use routinelog_domain::constants::{
    ADVICE_MAX_TOKENS, CHAT_TEMPERATURE, RESPONSE_TIMESTAMP_FORMAT, SUGGESTION_MAX_TOKENS,
};
use routinelog_domain::{
    AdviceResponse, AdvisorConfig, CategorySuggestion, FeedbackFocus, FeedbackResponse,
    Result as DomainResult, RoutineLogError,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenAiError,
};
use crate::http::HttpClient;

const ADVICE_SYSTEM_PROMPT: &str = r#"You are an AI coach for a routine-tracking service. You analyse the user's logged routine data and give practical, encouraging advice.

IMPORTANT: respond with JSON only. No markdown, no code fences, no text outside the JSON object.

Output format:
{
  "summary": "one-sentence overall assessment",
  "advices": [
    {"title": "short title", "description": "concrete, actionable step", "priority": 1},
    {"title": "short title", "description": "concrete, actionable step", "priority": 2},
    {"title": "short title", "description": "concrete, actionable step", "priority": 3}
  ],
  "timestamp": "YYYY-MM-DD HH:MM:SS"
}

Rules:
1. The advices array must contain exactly 3 entries with priority 1 to 3 (1 = most important).
2. Ground every advice in the routine data provided. Do not invent activities.
3. Each description must name a specific, doable change.
4. Keep the summary to a single sentence."#;

const CATEGORY_SYSTEM_PROMPT: &str = r#"You classify a user-described activity into one of the fixed routine categories: sleep, meal, routine, exercise, hobby, other.

IMPORTANT: respond with JSON only. No markdown, no code fences, no text outside the JSON object.

Output format:
{
  "suggested_category": "one of: sleep, meal, routine, exercise, hobby, other",
  "category_description": "why this category fits",
  "alternative_categories": [
    {"name": "another fitting category", "reason": "why it could also apply"}
  ],
  "routines": [
    {"name": "related routine idea", "description": "what it involves", "time_estimate": "e.g. 30 minutes"}
  ],
  "timestamp": "YYYY-MM-DD HH:MM:SS"
}

Rules:
1. suggested_category must be one of the six fixed categories.
2. Suggest at most 2 alternative categories and at most 3 routine ideas."#;

/// Chat-completions client for routine advice, feedback, and category
/// suggestions.
///
/// Sends exactly one request per invocation. A missing API key short-circuits
/// into a configuration error without touching the network, which the advisor
/// service renders as the "advisor disabled" fallback.
pub struct OpenAiClient {
    http: HttpClient,
    api_key: Option<String>,
    model: String,
    suggestion_model: String,
    api_url: String,
}

impl OpenAiClient {
    pub fn new(config: &AdvisorConfig) -> DomainResult<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            suggestion_model: config.suggestion_model.clone(),
            api_url: config.api_url.clone(),
        })
    }

    fn require_key(&self) -> DomainResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| RoutineLogError::Config("advisor API key is not configured".to_string()))
    }

    /// Send one chat-completion request and parse the model's JSON reply
    /// into `T`.
    async fn call_api<T: DeserializeOwned>(
        &self,
        api_key: &str,
        model: &str,
        system_prompt: &str,
        user_message: String,
        max_tokens: u32,
    ) -> Result<T, OpenAiError> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(user_message)],
            max_tokens,
            temperature: CHAT_TEMPERATURE,
        };

        let builder = self
            .http
            .request(Method::POST, &self.api_url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request);

        let response = self.http.send(builder).await.map_err(|err| match err {
            RoutineLogError::Network(msg) => OpenAiError::Network(msg),
            other => OpenAiError::Network(other.to_string()),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error_status(status.as_u16(), &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| OpenAiError::InvalidSchema(format!("invalid completion body: {err}")))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| OpenAiError::InvalidSchema("completion has no choices".to_string()))?;

        let content = strip_json_fence(&choice.message.content);
        debug!(model, content_len = content.len(), "parsing model reply");

        serde_json::from_str(content).map_err(|err| {
            warn!(model, error = %err, "model reply is not the expected JSON");
            OpenAiError::InvalidSchema(format!("model reply is not the expected JSON: {err}"))
        })
    }
}

#[async_trait]
impl AdvisorGateway for OpenAiClient {
    async fn request_advice(&self, context: &str, user_input: &str) -> DomainResult<AdviceResponse> {
        let api_key = self.require_key()?;
        let user_message = format!(
            "User question/concern: {user_input}\n\n{context}\n\n\
             Ground the advice strictly in the patterns visible in the routine data above. \
             Avoid speculation and generic suggestions."
        );

        let mut advice: AdviceResponse = self
            .call_api(api_key, &self.model, ADVICE_SYSTEM_PROMPT, user_message, ADVICE_MAX_TOKENS)
            .await?;
        backfill_timestamp(&mut advice.timestamp);
        Ok(advice)
    }

    async fn request_feedback(
        &self,
        context: &str,
        focus: FeedbackFocus,
    ) -> DomainResult<FeedbackResponse> {
        let api_key = self.require_key()?;
        let system_prompt = feedback_system_prompt(focus);
        let user_message = format!(
            "Please review the routine data below and give realtime feedback.\n\n{context}\n\n\
             Balance positive observations with constructive suggestions, \
             using only facts from the data."
        );

        let mut feedback: FeedbackResponse = self
            .call_api(api_key, &self.model, &system_prompt, user_message, ADVICE_MAX_TOKENS)
            .await?;
        backfill_timestamp(&mut feedback.timestamp);
        Ok(feedback)
    }

    async fn request_category_suggestion(
        &self,
        user_input: &str,
    ) -> DomainResult<CategorySuggestion> {
        let api_key = self.require_key()?;
        let user_message = format!(
            "Activity described by the user: {user_input}\n\n\
             Suggest the best fitting category and related routine ideas."
        );

        let mut suggestion: CategorySuggestion = self
            .call_api(
                api_key,
                &self.suggestion_model,
                CATEGORY_SYSTEM_PROMPT,
                user_message,
                SUGGESTION_MAX_TOKENS,
            )
            .await?;
        backfill_timestamp(&mut suggestion.timestamp);
        Ok(suggestion)
    }
}

fn feedback_system_prompt(focus: FeedbackFocus) -> String {
    let mut points = String::new();
    for point in composer::focus_analysis_points(focus) {
        points.push_str("- ");
        points.push_str(point);
        points.push('\n');
    }

    format!(
        r#"You are an AI coach for a routine-tracking service. Analyse the user's routine statistics and give realtime feedback, emphasising {emphasis}.

Analyse in particular:
{points}
IMPORTANT: respond with JSON only. No markdown, no code fences, no text outside the JSON object.

Output format:
{{
  "summary": "one-sentence overall assessment",
  "feedbacks": [
    {{"title": "short title", "description": "specific observation or suggestion", "type": "positive"}},
    {{"title": "short title", "description": "specific observation or suggestion", "type": "suggestion"}},
    {{"title": "short title", "description": "specific observation or suggestion", "type": "neutral"}}
  ],
  "timestamp": "YYYY-MM-DD HH:MM:SS"
}}

Rules:
1. The feedbacks array must contain exactly 3 entries.
2. type must be one of: positive, suggestion, neutral.
3. Ground every entry in the statistics provided. Do not invent activities."#,
        emphasis = composer::focus_emphasis(focus),
        points = points,
    )
}

fn classify_error_status(status: u16, body: &str) -> OpenAiError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|envelope| match envelope.error.code {
            Some(code) => format!("{code}: {}", envelope.error.message),
            None => envelope.error.message,
        })
        .unwrap_or_else(|_| body.to_string());

    match status {
        401 | 403 => OpenAiError::Authentication(message),
        429 => OpenAiError::RateLimit(message),
        _ => OpenAiError::Api { status, message },
    }
}

/// Models occasionally wrap the JSON reply in a markdown fence despite the
/// prompt; strip it before parsing.
fn strip_json_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open.strip_suffix("```").unwrap_or(without_open).trim()
}

fn backfill_timestamp(timestamp: &mut String) {
    if timestamp.is_empty() {
        *timestamp = Local::now().format(RESPONSE_TIMESTAMP_FORMAT).to_string();
    }
}
