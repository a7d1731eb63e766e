//! Advisor response contracts
//!
//! JSON shapes produced by the external chat-completion service, plus the
//! tagged outcome types that keep model output and canned fallbacks apart.

use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/* Advice */
/* -------------------------------------------------------------------------- */

/// Free-form advice response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub summary: String,
    pub advices: Vec<AdviceItem>,
    /// Backfilled locally when the model omits it.
    #[serde(default)]
    pub timestamp: String,
}

/// One actionable advice entry, ordered by `priority` (1 = most important).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceItem {
    pub title: String,
    pub description: String,
    pub priority: i32,
}

/* -------------------------------------------------------------------------- */
/* Realtime feedback */
/* -------------------------------------------------------------------------- */

/// Realtime feedback response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub summary: String,
    pub feedbacks: Vec<FeedbackItem>,
    #[serde(default)]
    pub timestamp: String,
}

/// One feedback entry with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
}

/// Feedback classification produced by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Positive,
    Suggestion,
    Neutral,
}

/// Which statistics view the feedback prompt should emphasise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackFocus {
    Date,
    Category,
    Time,
    Overall,
    General,
}

impl Default for FeedbackFocus {
    fn default() -> Self {
        Self::General
    }
}

/* -------------------------------------------------------------------------- */
/* Category suggestion */
/* -------------------------------------------------------------------------- */

/// Category suggestion for a user-described activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub suggested_category: String,
    pub category_description: String,
    #[serde(default)]
    pub alternative_categories: Vec<AlternativeCategory>,
    #[serde(default)]
    pub routines: Vec<RoutineIdea>,
    #[serde(default)]
    pub timestamp: String,
}

/// An alternative category with the reason it could apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeCategory {
    pub name: String,
    pub reason: String,
}

/// A suggested routine related to the described activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineIdea {
    pub name: String,
    pub description: String,
    pub time_estimate: String,
}

/* -------------------------------------------------------------------------- */
/* Tagged outcomes */
/* -------------------------------------------------------------------------- */

/// Why an advisor call fell back to a canned response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorFailure {
    /// Quota exhausted or rate limited (HTTP 429 / insufficient_quota).
    Quota,
    /// API key rejected.
    Auth,
    /// Connection, DNS, or timeout failure.
    Network,
    /// The model replied with something that is not the expected JSON.
    Parse,
    /// No API key configured; the advisor is disabled.
    Disabled,
}

/// Advisor result: genuine model output or a schema-conformant fallback.
///
/// Callers that only render the payload can use [`AdviceOutcome::response`];
/// the tag stays available for surfaces that want to badge degraded output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AdviceOutcome {
    Model(AdviceResponse),
    Fallback { reason: AdvisorFailure, response: AdviceResponse },
}

impl AdviceOutcome {
    /// The renderable payload regardless of provenance.
    pub fn response(&self) -> &AdviceResponse {
        match self {
            Self::Model(response) | Self::Fallback { response, .. } => response,
        }
    }

    /// True when this is a canned fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Feedback counterpart of [`AdviceOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FeedbackOutcome {
    Model(FeedbackResponse),
    Fallback { reason: AdvisorFailure, response: FeedbackResponse },
}

impl FeedbackOutcome {
    pub fn response(&self) -> &FeedbackResponse {
        match self {
            Self::Model(response) | Self::Fallback { response, .. } => response,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Category-suggestion counterpart of [`AdviceOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SuggestionOutcome {
    Model(CategorySuggestion),
    Fallback { reason: AdvisorFailure, response: CategorySuggestion },
}

impl SuggestionOutcome {
    pub fn response(&self) -> &CategorySuggestion {
        match self {
            Self::Model(response) | Self::Fallback { response, .. } => response,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}
