//! Advisor commands
//!
//! These never fail on advisor-side problems; the service substitutes a
//! tagged fallback. The only error path is fetching the record snapshot.

use std::sync::Arc;

use routinelog_domain::{AdviceOutcome, FeedbackFocus, FeedbackOutcome, Result, SuggestionOutcome};
use tracing::info;

use crate::context::AppContext;

/// Free-form advice for a user question, grounded in the full record set.
pub async fn get_advice(ctx: &Arc<AppContext>, user_input: &str) -> Result<AdviceOutcome> {
    info!(command = "advice::get_advice", "executing");
    let records = ctx.records.all_records().await?;
    Ok(ctx.advisor.advice(&records, user_input).await)
}

/// Realtime feedback with the given analysis emphasis.
pub async fn get_feedback(
    ctx: &Arc<AppContext>,
    focus: FeedbackFocus,
) -> Result<FeedbackOutcome> {
    info!(command = "advice::get_feedback", ?focus, "executing");
    let records = ctx.records.all_records().await?;
    Ok(ctx.advisor.feedback(&records, focus).await)
}

/// Category and routine suggestions for a user-described activity.
pub async fn suggest_category(
    ctx: &Arc<AppContext>,
    user_input: &str,
) -> Result<SuggestionOutcome> {
    info!(command = "advice::suggest_category", "executing");
    Ok(ctx.advisor.category_suggestion(user_input).await)
}
