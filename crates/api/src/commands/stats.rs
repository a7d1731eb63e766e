//! Statistics commands
//!
//! Store-wide counters come straight from the repository; the derived views
//! (category breakdown, hourly distribution, weekly trend) are computed in
//! core over the full record set.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use routinelog_core::stats;
use routinelog_domain::{
    CategoryBreakdown, HourlyBucket, Result, StatisticsSummary, TrendPoint,
};
use tracing::info;

use crate::context::AppContext;

/// Store-wide counters, optionally restricted to a date window.
pub async fn get_statistics(
    ctx: &Arc<AppContext>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<StatisticsSummary> {
    info!(command = "stats::get_statistics", ?start, ?end, "executing");
    ctx.records.statistics(start, end).await
}

/// Per-category counts, durations, and shares in fixed category order.
pub async fn get_category_breakdown(ctx: &Arc<AppContext>) -> Result<Vec<CategoryBreakdown>> {
    info!(command = "stats::get_category_breakdown", "executing");
    let records = ctx.records.all_records().await?;
    Ok(stats::category_breakdown(&records))
}

/// Activity starts per hour of day, all 24 buckets present.
pub async fn get_hourly_distribution(ctx: &Arc<AppContext>) -> Result<Vec<HourlyBucket>> {
    info!(command = "stats::get_hourly_distribution", "executing");
    let records = ctx.records.all_records().await?;
    Ok(stats::hourly_distribution(&records))
}

/// Last seven days oldest first, empty days zero-filled.
pub async fn get_weekly_trend(ctx: &Arc<AppContext>) -> Result<Vec<TrendPoint>> {
    info!(command = "stats::get_weekly_trend", "executing");
    let records = ctx.records.all_records().await?;
    Ok(stats::weekly_trend(&records, Local::now().date_naive()))
}

#[cfg(test)]
mod tests {
    use routinelog_domain::constants::{HOURS_PER_DAY, TREND_DAYS};
    use routinelog_domain::NewRecord;

    use super::*;
    use crate::commands::test_support::test_context;

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_store_yields_zeroed_views() {
        let (ctx, _dir) = test_context();

        let summary = get_statistics(&ctx, None, None).await.expect("summary");
        assert_eq!(summary.total_records, 0);
        assert!(summary.category_stats.is_empty());

        assert!(get_category_breakdown(&ctx).await.expect("breakdown").is_empty());

        let hourly = get_hourly_distribution(&ctx).await.expect("hourly");
        assert_eq!(hourly.len(), HOURS_PER_DAY as usize);
        assert!(hourly.iter().all(|b| b.count == 0));

        let trend = get_weekly_trend(&ctx).await.expect("trend");
        assert_eq!(trend.len(), TREND_DAYS as usize);
        assert!(trend.iter().all(|p| p.count == 0));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn breakdown_reflects_stored_records() {
        let (ctx, _dir) = test_context();
        ctx.records
            .add_record(NewRecord {
                activity: "run".to_string(),
                category: "exercise".to_string(),
                start_time: "07:00".to_string(),
                end_time: "07:45".to_string(),
                memo: None,
                date: None,
            })
            .await
            .expect("added");

        let breakdown = get_category_breakdown(&ctx).await.expect("breakdown");

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].category, "exercise");
        assert_eq!(breakdown[0].count, 1);
        assert!((breakdown[0].total_minutes - 45.0).abs() < f64::EPSILON);
    }
}
