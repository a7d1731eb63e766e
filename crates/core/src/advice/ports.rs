//! Port interface for the external advisor model

use async_trait::async_trait;
use routinelog_domain::{
    AdviceResponse, CategorySuggestion, FeedbackFocus, FeedbackResponse, Result,
};

/// Trait for one-shot chat-completion requests against the advisor model.
///
/// Implementations perform exactly one network attempt per call; retry
/// policy, if any, belongs to callers. Errors carry enough detail for
/// [`crate::advice::AdvisorService`] to pick the matching fallback.
#[async_trait]
pub trait AdvisorGateway: Send + Sync {
    /// Free-form advice for `user_input`, grounded in the composed context.
    async fn request_advice(&self, context: &str, user_input: &str) -> Result<AdviceResponse>;

    /// Realtime feedback over the composed statistics context.
    async fn request_feedback(&self, context: &str, focus: FeedbackFocus)
        -> Result<FeedbackResponse>;

    /// Category and routine suggestions for a user-described activity.
    async fn request_category_suggestion(&self, user_input: &str) -> Result<CategorySuggestion>;
}
