//! Prompt context composition
//!
//! Renders a record snapshot into the deterministic text block the advisor
//! prompts embed. Only facts present in the input appear; nothing here
//! touches the clock or the database.

use std::fmt::Write as _;

use chrono::NaiveDate;
use routinelog_domain::constants::{RECENT_ACTIVITY_LINES, SLEEP_PATTERN_TAIL};
use routinelog_domain::{Category, FeedbackFocus, Record};

use crate::stats;

const NO_RECORDS: &str = "No routine records have been logged yet.";

/// Compose the data context embedded in the free-form advice prompt.
///
/// Sections in fixed order: header with count and date range, category
/// breakdown, the most recent activity lines, the sleep-pattern tail,
/// today's activities, and the current logging streak. Sections without
/// supporting data are omitted entirely.
pub fn compose_advice_context(records: &[Record], today: NaiveDate) -> String {
    if records.is_empty() {
        return NO_RECORDS.to_string();
    }

    let mut out = String::new();
    push_header(&mut out, records);
    push_category_section(&mut out, records);
    push_recent_section(&mut out, records);
    push_sleep_section(&mut out, records);
    push_today_section(&mut out, records, today);
    push_streak_section(&mut out, records, today);
    out.trim_end().to_string()
}

/// Compose the statistics-focused context for realtime feedback.
///
/// Extends the advice context with the per-hour start distribution, the
/// most active hour, daily averages, and the analysis emphasis selected by
/// `focus`.
pub fn compose_feedback_context(
    records: &[Record],
    today: NaiveDate,
    focus: FeedbackFocus,
) -> String {
    if records.is_empty() {
        return NO_RECORDS.to_string();
    }

    let mut out = compose_advice_context(records, today);
    out.push_str("\n\n");
    push_hourly_section(&mut out, records);
    push_average_section(&mut out, records);
    push_focus_section(&mut out, focus);
    out.trim_end().to_string()
}

/// The analysis emphasis sentence for a feedback focus.
pub fn focus_emphasis(focus: FeedbackFocus) -> &'static str {
    match focus {
        FeedbackFocus::Date => "per-date logging patterns and consistency",
        FeedbackFocus::Category => "time distribution and balance across categories",
        FeedbackFocus::Time => "hour-of-day activity patterns and efficiency",
        FeedbackFocus::Overall => "the overall routine pattern and a holistic assessment",
        FeedbackFocus::General => "the general routine pattern",
    }
}

/// Bullet points the feedback prompt asks the model to analyse for a focus.
pub fn focus_analysis_points(focus: FeedbackFocus) -> &'static [&'static str] {
    match focus {
        FeedbackFocus::Date => &[
            "logging consistency over the recent weeks",
            "how logging frequency is trending",
            "weekday or period-specific patterns",
            "what distinguishes heavily and lightly logged days",
        ],
        FeedbackFocus::Category => &[
            "how balanced the time split across categories is",
            "which category receives the most time",
            "underrepresented categories and how to grow them",
            "variety of activities within each category",
        ],
        FeedbackFocus::Time => &[
            "when during the day activities tend to start",
            "the most active hours",
            "how efficiently activity time is used",
            "whether per-category average durations look reasonable",
        ],
        FeedbackFocus::Overall => &[
            "consistency and persistence of the whole log",
            "weekly activity trend",
            "total and average activity time",
            "overall balance of the routine and where to improve",
        ],
        FeedbackFocus::General => &[
            "sleep duration and pattern",
            "time distribution across categories",
            "continuity and regularity of activities",
            "today's activities compared with the recent pattern",
        ],
    }
}

fn push_header(out: &mut String, records: &[Record]) {
    let mut dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    dates.sort_unstable();
    dates.dedup();

    let _ = writeln!(out, "=== Routine data summary ===");
    let _ = writeln!(out, "Total records: {}", records.len());
    let _ = writeln!(out, "Logged days: {}", dates.len());
    if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
        let _ = writeln!(out, "Range: {first} ~ {last}");
    }
    out.push('\n');
}

fn push_category_section(out: &mut String, records: &[Record]) {
    let _ = writeln!(out, "Activity counts by category:");
    for entry in stats::category_breakdown(records) {
        let _ = writeln!(
            out,
            "  - {}: {} times ({:.1}h total)",
            entry.category,
            entry.count,
            entry.total_minutes / 60.0
        );
    }
    out.push('\n');
}

fn push_recent_section(out: &mut String, records: &[Record]) {
    let mut recent: Vec<&Record> = records.iter().collect();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent.truncate(RECENT_ACTIVITY_LINES);

    let _ = writeln!(out, "Recent activity:");
    for record in recent {
        out.push_str(&activity_line(record));
        out.push('\n');
    }
    out.push('\n');
}

fn push_sleep_section(out: &mut String, records: &[Record]) {
    let sleep: Vec<&Record> = records
        .iter()
        .filter(|r| Category::parse(&r.category) == Some(Category::Sleep))
        .collect();
    if sleep.is_empty() {
        return;
    }

    let tail_start = sleep.len().saturating_sub(SLEEP_PATTERN_TAIL);
    let _ = writeln!(out, "Sleep pattern:");
    for record in &sleep[tail_start..] {
        let memo = record.memo.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "  - {} {}-{}: {}",
            record.date, record.start_time, record.end_time, memo
        );
    }
    out.push('\n');
}

fn push_today_section(out: &mut String, records: &[Record], today: NaiveDate) {
    let today_str = today.format("%Y-%m-%d").to_string();
    let today_records: Vec<&Record> =
        records.iter().filter(|r| r.date == today_str).collect();
    if today_records.is_empty() {
        return;
    }

    let _ = writeln!(out, "Today's ({today_str}) activities:");
    for record in today_records {
        let minutes = stats::duration_minutes(&record.start_time, &record.end_time);
        let _ = writeln!(
            out,
            "  - {}-{}: {} ({}, {:.0} min)",
            record.start_time, record.end_time, record.activity, record.category, minutes
        );
    }
    out.push('\n');
}

fn push_streak_section(out: &mut String, records: &[Record], today: NaiveDate) {
    let streak = stats::logging_streak(records, today);
    if streak > 0 {
        let _ = writeln!(out, "Current logging streak: {streak} day(s)");
        out.push('\n');
    }
}

fn push_hourly_section(out: &mut String, records: &[Record]) {
    let buckets = stats::hourly_distribution(records);
    let active: Vec<_> = buckets.iter().filter(|b| b.count > 0).collect();
    if active.is_empty() {
        return;
    }

    let _ = writeln!(out, "Activity starts by hour:");
    for bucket in &active {
        let _ = writeln!(out, "  - {:02}:00: {} starts", bucket.hour, bucket.count);
    }
    if let Some(busiest) = active.iter().max_by_key(|b| b.count) {
        let _ = writeln!(out, "Most active hour: {:02}:00", busiest.hour);
    }
    out.push('\n');
}

fn push_average_section(out: &mut String, records: &[Record]) {
    let totals = stats::totals(records);
    if totals.distinct_days == 0 {
        return;
    }

    let per_day = totals.total_records as f64 / totals.distinct_days as f64;
    let hours_per_day = totals.total_minutes / 60.0 / totals.distinct_days as f64;
    let _ = writeln!(
        out,
        "Daily average: {per_day:.1} records, {hours_per_day:.1} hours of logged activity"
    );
    out.push('\n');
}

fn push_focus_section(out: &mut String, focus: FeedbackFocus) {
    let _ = writeln!(out, "Analysis focus: {}", focus_emphasis(focus));
    let _ = writeln!(out, "Pay particular attention to:");
    for point in focus_analysis_points(focus) {
        let _ = writeln!(out, "  - {point}");
    }
}

fn activity_line(record: &Record) -> String {
    let base = format!(
        "  [{}] {}-{} | {} | {}",
        record.date, record.start_time, record.end_time, record.activity, record.category
    );
    match record.memo.as_deref().map(str::trim) {
        Some(memo) if !memo.is_empty() => format!("{base} | memo: {memo}"),
        _ => base,
    }
}
