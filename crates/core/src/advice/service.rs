//! Advisor service - prompt composition, gateway calls, fallback mapping
//!
//! The gateway performs exactly one network attempt; every failure is
//! classified here and replaced with a schema-conformant canned response so
//! callers always receive something renderable. The provenance tag keeps
//! degraded output distinguishable from genuine model output.

use std::sync::Arc;

use chrono::Local;
use routinelog_domain::constants::RESPONSE_TIMESTAMP_FORMAT;
use routinelog_domain::{
    AdviceItem, AdviceOutcome, AdviceResponse, AdvisorFailure, AlternativeCategory,
    CategorySuggestion, FeedbackFocus, FeedbackItem, FeedbackKind, FeedbackOutcome,
    FeedbackResponse, Record, RoutineLogError, RoutineIdea, SuggestionOutcome,
};
use tracing::warn;

use super::composer;
use super::ports::AdvisorGateway;

/// Facade over the advisor gateway that never fails outward.
pub struct AdvisorService {
    gateway: Arc<dyn AdvisorGateway>,
}

impl AdvisorService {
    /// Create a new advisor service.
    pub fn new(gateway: Arc<dyn AdvisorGateway>) -> Self {
        Self { gateway }
    }

    /// Free-form advice for `user_input`, grounded in the record snapshot.
    pub async fn advice(&self, records: &[Record], user_input: &str) -> AdviceOutcome {
        let context = composer::compose_advice_context(records, Local::now().date_naive());
        match self.gateway.request_advice(&context, user_input).await {
            Ok(response) => AdviceOutcome::Model(response),
            Err(err) => {
                let reason = classify(&err);
                warn!(%err, ?reason, "advice request failed, serving fallback");
                AdviceOutcome::Fallback { reason, response: advice_fallback(reason) }
            }
        }
    }

    /// Realtime feedback over the statistics-focused context.
    pub async fn feedback(&self, records: &[Record], focus: FeedbackFocus) -> FeedbackOutcome {
        let context =
            composer::compose_feedback_context(records, Local::now().date_naive(), focus);
        match self.gateway.request_feedback(&context, focus).await {
            Ok(response) => FeedbackOutcome::Model(response),
            Err(err) => {
                let reason = classify(&err);
                warn!(%err, ?reason, "feedback request failed, serving fallback");
                FeedbackOutcome::Fallback { reason, response: feedback_fallback(reason) }
            }
        }
    }

    /// Category and routine suggestions for a user-described activity.
    pub async fn category_suggestion(&self, user_input: &str) -> SuggestionOutcome {
        match self.gateway.request_category_suggestion(user_input).await {
            Ok(response) => SuggestionOutcome::Model(response),
            Err(err) => {
                let reason = classify(&err);
                warn!(%err, ?reason, "category suggestion failed, serving fallback");
                SuggestionOutcome::Fallback {
                    reason,
                    response: suggestion_fallback(user_input),
                }
            }
        }
    }
}

/// Map a gateway error onto a fallback reason.
///
/// Rate limiting surfaces as a network error carrying the HTTP status, so
/// the quota markers are checked before the variant itself.
fn classify(err: &RoutineLogError) -> AdvisorFailure {
    let text = err.to_string();
    if text.contains("insufficient_quota") || text.contains("429") {
        return AdvisorFailure::Quota;
    }
    match err {
        RoutineLogError::Auth(_) => AdvisorFailure::Auth,
        RoutineLogError::Config(_) => AdvisorFailure::Disabled,
        RoutineLogError::Parse(_) => AdvisorFailure::Parse,
        _ => AdvisorFailure::Network,
    }
}

fn advice_fallback(reason: AdvisorFailure) -> AdviceResponse {
    let (summary, advices) = match reason {
        AdvisorFailure::Quota => (
            "API quota exceeded.",
            vec![
                advice(
                    "Check your OpenAI account",
                    "Verify the billing details and usage limits on your OpenAI account.",
                    1,
                ),
                advice(
                    "Top up credits",
                    "The account may be out of credits. Review billing and add credits if needed.",
                    2,
                ),
                advice(
                    "Retry later",
                    "Wait for the usage limit to reset, or switch to a different API key.",
                    3,
                ),
            ],
        ),
        AdvisorFailure::Parse => (
            "The advisor response could not be parsed.",
            vec![advice("Try again", "Please try again shortly.", 1)],
        ),
        AdvisorFailure::Disabled => (
            "The advisor is disabled.",
            vec![advice(
                "Configure an API key",
                "Set an advisor API key in the configuration to enable advice.",
                1,
            )],
        ),
        AdvisorFailure::Auth | AdvisorFailure::Network => (
            "The advisor could not be reached.",
            vec![
                advice("Check the API key", "Verify that the advisor API key is valid.", 1),
                advice("Check your network connection", "Verify internet connectivity.", 2),
                advice("Try again", "Please try again shortly.", 3),
            ],
        ),
    };

    AdviceResponse { summary: summary.to_string(), advices, timestamp: now_stamp() }
}

fn feedback_fallback(reason: AdvisorFailure) -> FeedbackResponse {
    let (summary, title, description) = match reason {
        AdvisorFailure::Quota => (
            "API quota exceeded.",
            "Check your OpenAI account",
            "Verify the billing details and usage limits on your OpenAI account.",
        ),
        AdvisorFailure::Parse => {
            ("Feedback could not be generated.", "Try again", "Please try again shortly.")
        }
        AdvisorFailure::Disabled => (
            "The advisor is disabled.",
            "Configure an API key",
            "Set an advisor API key in the configuration to enable feedback.",
        ),
        AdvisorFailure::Auth | AdvisorFailure::Network => (
            "Feedback could not be loaded.",
            "Check the configuration",
            "Verify the advisor API key and your network connection, then try again.",
        ),
    };

    FeedbackResponse {
        summary: summary.to_string(),
        feedbacks: vec![FeedbackItem {
            title: title.to_string(),
            description: description.to_string(),
            kind: FeedbackKind::Neutral,
        }],
        timestamp: now_stamp(),
    }
}

fn suggestion_fallback(user_input: &str) -> CategorySuggestion {
    let name = if user_input.trim().is_empty() { "New routine" } else { user_input.trim() };

    CategorySuggestion {
        suggested_category: "other".to_string(),
        category_description: "The category could not be determined automatically.".to_string(),
        alternative_categories: vec![AlternativeCategory {
            name: "routine".to_string(),
            reason: "Fits most recurring daily activities.".to_string(),
        }],
        routines: vec![RoutineIdea {
            name: name.to_string(),
            description: "Activity described by the user.".to_string(),
            time_estimate: "30 minutes".to_string(),
        }],
        timestamp: now_stamp(),
    }
}

fn advice(title: &str, description: &str, priority: i32) -> AdviceItem {
    AdviceItem { title: title.to_string(), description: description.to_string(), priority }
}

fn now_stamp() -> String {
    Local::now().format(RESPONSE_TIMESTAMP_FORMAT).to_string()
}
