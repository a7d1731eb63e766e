//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Wall-clock formats used by records
pub const TIME_FORMAT: &str = "%H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const RESPONSE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Statistics windows
pub const DATE_STATS_LIMIT: usize = 30;
pub const TREND_DAYS: u32 = 7;
pub const HOURS_PER_DAY: u32 = 24;

// Prompt composition limits
pub const RECENT_ACTIVITY_LINES: usize = 10;
pub const SLEEP_PATTERN_TAIL: usize = 3;

// Advisor request budget
pub const ADVICE_MAX_TOKENS: u32 = 1000;
pub const SUGGESTION_MAX_TOKENS: u32 = 800;
pub const CHAT_TEMPERATURE: f32 = 0.7;
