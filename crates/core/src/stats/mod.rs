//! Statistics aggregation over record snapshots
//!
//! Every function here is a pure function of the record slice passed in,
//! recomputed on demand. Empty input yields zeroed/empty aggregates, never
//! an error.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Duration, NaiveDate, NaiveTime};
use routinelog_domain::constants::{HOURS_PER_DAY, TIME_FORMAT, TREND_DAYS};
use routinelog_domain::{
    Category, CategoryBreakdown, DailyRollup, HourlyBucket, Record, RecordTotals, TrendPoint,
};

/// Minutes between two `HH:MM` wall-clock times.
///
/// An end before the start is treated as crossing midnight (24h added), so
/// `23:30 → 00:15` is 45 minutes. Any parse failure yields `0.0`.
pub fn duration_minutes(start: &str, end: &str) -> f64 {
    let (Some(start), Some(end)) = (parse_hhmm(start), parse_hhmm(end)) else {
        return 0.0;
    };

    let mut delta = end.signed_duration_since(start);
    if delta < Duration::zero() {
        delta += Duration::hours(24);
    }
    delta.num_minutes() as f64
}

/// Per-category count/duration rollup in fixed display order.
///
/// The six known categories keep their fixed rank; unrecognized category
/// values sort after them by descending count.
pub fn category_breakdown(records: &[Record]) -> Vec<CategoryBreakdown> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut minutes: HashMap<&str, f64> = HashMap::new();

    for record in records {
        *counts.entry(record.category.as_str()).or_insert(0) += 1;
        *minutes.entry(record.category.as_str()).or_insert(0.0) +=
            duration_minutes(&record.start_time, &record.end_time);
    }

    let total = records.len();
    let mut breakdown: Vec<CategoryBreakdown> = counts
        .into_iter()
        .map(|(category, count)| {
            let total_minutes = minutes.get(category).copied().unwrap_or(0.0);
            CategoryBreakdown {
                category: category.to_string(),
                count,
                total_minutes,
                average_minutes: if count > 0 { total_minutes / count as f64 } else { 0.0 },
                share_pct: if total > 0 { count as f64 / total as f64 * 100.0 } else { 0.0 },
            }
        })
        .collect();

    breakdown.sort_by(|a, b| {
        Category::display_rank(&a.category)
            .cmp(&Category::display_rank(&b.category))
            .then(b.count.cmp(&a.count))
            .then(a.category.cmp(&b.category))
    });

    breakdown
}

/// Records started per hour-of-day, all 24 buckets present.
///
/// Records with malformed start times are not counted.
pub fn hourly_distribution(records: &[Record]) -> Vec<HourlyBucket> {
    let mut buckets: Vec<HourlyBucket> =
        (0..HOURS_PER_DAY).map(|hour| HourlyBucket { hour, count: 0 }).collect();

    for record in records {
        if let Some(hour) = record.start_hour() {
            buckets[hour as usize].count += 1;
        }
    }

    buckets
}

/// Per-day count and total duration, date ascending.
///
/// Records with unparseable dates are skipped.
pub fn daily_rollups(records: &[Record]) -> Vec<DailyRollup> {
    let mut days: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();

    for record in records {
        let Some(date) = record.date_naive() else {
            continue;
        };
        let entry = days.entry(date).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += duration_minutes(&record.start_time, &record.end_time);
    }

    days.into_iter()
        .map(|(date, (count, total_minutes))| DailyRollup { date, count, total_minutes })
        .collect()
}

/// Dual-series trend for the 7 days ending at `today`.
///
/// Days without records are zero-filled so the time axis stays continuous.
pub fn weekly_trend(records: &[Record], today: NaiveDate) -> Vec<TrendPoint> {
    let rollups: HashMap<NaiveDate, (usize, f64)> = daily_rollups(records)
        .into_iter()
        .map(|rollup| (rollup.date, (rollup.count, rollup.total_minutes)))
        .collect();

    (0..TREND_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_signed(Duration::days(i64::from(offset))))
        .map(|date| {
            let (count, minutes) = rollups.get(&date).copied().unwrap_or((0, 0.0));
            TrendPoint { date, count, total_hours: minutes / 60.0 }
        })
        .collect()
}

/// Whole-store totals: record count, total/average minutes, distinct days.
pub fn totals(records: &[Record]) -> RecordTotals {
    let total_minutes: f64 = records
        .iter()
        .map(|record| duration_minutes(&record.start_time, &record.end_time))
        .sum();
    let distinct_days: HashSet<&str> =
        records.iter().map(|record| record.date.as_str()).collect();

    RecordTotals {
        total_records: records.len(),
        total_minutes,
        average_minutes: if records.is_empty() {
            0.0
        } else {
            total_minutes / records.len() as f64
        },
        distinct_days: distinct_days.len(),
    }
}

/// Consecutive logged days walking backward from `today`.
///
/// Stops at the first day with zero records; a today without records yields
/// a streak of zero.
pub fn logging_streak(records: &[Record], today: NaiveDate) -> u32 {
    let logged: HashSet<NaiveDate> =
        records.iter().filter_map(routinelog_domain::Record::date_naive).collect();

    let mut streak = 0;
    let mut cursor = today;
    while logged.contains(&cursor) {
        streak += 1;
        match cursor.checked_sub_signed(Duration::days(1)) {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, category: &str, start: &str, end: &str) -> Record {
        Record {
            id: format!("rec-{date}-{start}"),
            activity: "activity".to_string(),
            category: category.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            memo: None,
            date: date.to_string(),
            timestamp: format!("{date}T12:00:00+00:00"),
            created_at: format!("{date}T12:00:00+00:00"),
        }
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn duration_handles_same_day_interval() {
        assert_eq!(duration_minutes("09:00", "10:30"), 90.0);
    }

    #[test]
    fn duration_wraps_past_midnight() {
        assert_eq!(duration_minutes("23:30", "00:15"), 45.0);
    }

    #[test]
    fn duration_is_zero_on_parse_failure() {
        assert_eq!(duration_minutes("bad", "10:30"), 0.0);
        assert_eq!(duration_minutes("09:00", ""), 0.0);
    }

    #[test]
    fn duration_of_equal_times_is_zero() {
        assert_eq!(duration_minutes("08:00", "08:00"), 0.0);
    }

    #[test]
    fn breakdown_orders_by_fixed_category_rank() {
        let records = vec![
            record("2025-06-01", "exercise", "07:00", "08:00"),
            record("2025-06-01", "sleep", "23:00", "07:00"),
            record("2025-06-02", "sleep", "23:30", "07:30"),
        ];

        let breakdown = category_breakdown(&records);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "sleep");
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[1].category, "exercise");
        assert_eq!(breakdown[1].count, 1);
        assert_eq!(breakdown[1].total_minutes, 60.0);
    }

    #[test]
    fn breakdown_puts_unknown_categories_last() {
        let records = vec![
            record("2025-06-01", "gardening", "10:00", "11:00"),
            record("2025-06-01", "gardening", "15:00", "16:00"),
            record("2025-06-01", "other", "12:00", "12:30"),
        ];

        let breakdown = category_breakdown(&records);

        assert_eq!(breakdown[0].category, "other");
        assert_eq!(breakdown[1].category, "gardening");
        assert_eq!(breakdown[1].count, 2);
    }

    #[test]
    fn breakdown_of_empty_input_is_empty() {
        assert!(category_breakdown(&[]).is_empty());
    }

    #[test]
    fn hourly_distribution_has_all_buckets() {
        let records = vec![
            record("2025-06-01", "meal", "09:15", "09:45"),
            record("2025-06-01", "meal", "09:50", "10:10"),
            record("2025-06-01", "sleep", "23:00", "07:00"),
            record("2025-06-01", "other", "bad", "10:00"),
        ];

        let buckets = hourly_distribution(&records);

        assert_eq!(buckets.len(), 24);
        assert_eq!(buckets[9].count, 2);
        assert_eq!(buckets[23].count, 1);
        assert_eq!(buckets[0].count, 0);
    }

    #[test]
    fn weekly_trend_zero_fills_missing_days() {
        let records = vec![
            record("2025-06-05", "meal", "09:00", "09:30"),
            record("2025-06-07", "exercise", "07:00", "08:00"),
        ];

        let trend = weekly_trend(&records, date("2025-06-07"));

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, date("2025-06-01"));
        assert_eq!(trend[0].count, 0);
        assert_eq!(trend[0].total_hours, 0.0);
        assert_eq!(trend[4].date, date("2025-06-05"));
        assert_eq!(trend[4].count, 1);
        assert_eq!(trend[6].count, 1);
        assert_eq!(trend[6].total_hours, 1.0);
    }

    #[test]
    fn totals_on_empty_input_are_zeroed() {
        assert_eq!(totals(&[]), RecordTotals::default());
    }

    #[test]
    fn totals_count_distinct_days() {
        let records = vec![
            record("2025-06-01", "meal", "09:00", "10:00"),
            record("2025-06-01", "meal", "12:00", "12:30"),
            record("2025-06-02", "meal", "09:00", "09:30"),
        ];

        let result = totals(&records);

        assert_eq!(result.total_records, 3);
        assert_eq!(result.total_minutes, 120.0);
        assert_eq!(result.average_minutes, 40.0);
        assert_eq!(result.distinct_days, 2);
    }

    #[test]
    fn streak_counts_back_from_today() {
        let records = vec![
            record("2025-06-07", "meal", "09:00", "10:00"),
            record("2025-06-06", "meal", "09:00", "10:00"),
            record("2025-06-05", "meal", "09:00", "10:00"),
            // gap on 2025-06-04
            record("2025-06-03", "meal", "09:00", "10:00"),
        ];

        assert_eq!(logging_streak(&records, date("2025-06-07")), 3);
    }

    #[test]
    fn streak_is_zero_without_today_record() {
        let records = vec![record("2025-06-06", "meal", "09:00", "10:00")];
        assert_eq!(logging_streak(&records, date("2025-06-07")), 0);
    }
}
