//! Statistics types derived from the record set
//!
//! All aggregates here are computed on demand and never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/* Store-level statistics */
/* -------------------------------------------------------------------------- */

/// Store-wide counters returned by the record repository.
///
/// `category_stats` is ordered by descending count; `date_stats` carries the
/// most recent 30 dates, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub total_records: i64,
    pub category_stats: Vec<CategoryCount>,
    pub date_stats: Vec<DateCount>,
}

/// Record count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Record count for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCount {
    pub date: String,
    pub count: i64,
}

/* -------------------------------------------------------------------------- */
/* Display-ready aggregates */
/* -------------------------------------------------------------------------- */

/// Count and duration rollup for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub count: usize,
    pub total_minutes: f64,
    pub average_minutes: f64,
    /// Share of the total record count, in percent.
    pub share_pct: f64,
}

/// Number of records starting within one hour-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyBucket {
    pub hour: u32,
    pub count: usize,
}

/// Per-day count and duration rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRollup {
    pub date: NaiveDate,
    pub count: usize,
    pub total_minutes: f64,
}

/// One point of the dual-series weekly trend (count + hours per day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: usize,
    pub total_hours: f64,
}

/// Whole-store duration totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTotals {
    pub total_records: usize,
    pub total_minutes: f64,
    pub average_minutes: f64,
    pub distinct_days: usize,
}
