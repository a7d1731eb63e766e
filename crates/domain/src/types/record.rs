//! Record model types
//!
//! These types represent the persisted activity record and the payloads
//! used to create and patch it. They mirror the `records` table schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::DATE_FORMAT;

/// One logged activity occurrence.
///
/// `date` and the time-of-day fields are stored as text in their canonical
/// formats (`YYYY-MM-DD`, `HH:MM`); `timestamp` is the RFC 3339 creation
/// instant and only orders listings, it carries no business meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub activity: String,
    pub category: String,
    pub start_time: String,
    pub end_time: String,
    pub memo: Option<String>,
    pub date: String,
    pub timestamp: String,
    pub created_at: String,
}

impl Record {
    /// Parse the attributed calendar date.
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Hour-of-day the activity started at, when `start_time` is well formed.
    pub fn start_hour(&self) -> Option<u32> {
        let hour = self.start_time.split(':').next()?;
        hour.parse::<u32>().ok().filter(|h| *h < 24)
    }
}

/// Payload for creating a record.
///
/// `date` defaults to the current local date when omitted (backdating via
/// calendar selection or imports supplies it explicitly).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecord {
    pub activity: String,
    pub category: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Partial update for a record.
///
/// Only supplied fields are written. `memo` is special-cased: `Some("")`
/// clears the stored memo while `None` leaves it untouched, distinguishing
/// "no-op" from "set-to-empty".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl RecordPatch {
    /// True when no field is supplied; such a patch must not touch storage.
    pub fn is_empty(&self) -> bool {
        self.activity.is_none()
            && self.category.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.memo.is_none()
    }
}

/// Fixed six-value category taxonomy.
///
/// Storage accepts arbitrary category strings; unrecognized values are kept
/// but sort after the fixed set in category-ordered displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sleep,
    Meal,
    Routine,
    Exercise,
    Hobby,
    Other,
}

impl Category {
    /// All categories in fixed display order.
    pub const ORDERED: [Self; 6] =
        [Self::Sleep, Self::Meal, Self::Routine, Self::Exercise, Self::Hobby, Self::Other];

    /// Canonical storage label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Meal => "meal",
            Self::Routine => "routine",
            Self::Exercise => "exercise",
            Self::Hobby => "hobby",
            Self::Other => "other",
        }
    }

    /// Parse a stored label. Unknown labels yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sleep" => Some(Self::Sleep),
            "meal" => Some(Self::Meal),
            "routine" => Some(Self::Routine),
            "exercise" => Some(Self::Exercise),
            "hobby" => Some(Self::Hobby),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Display rank for a stored label: recognized categories keep their
    /// fixed position, everything else lands in an unordered tail.
    pub fn display_rank(value: &str) -> usize {
        match Self::parse(value) {
            Some(category) => {
                Self::ORDERED.iter().position(|c| *c == category).unwrap_or(Self::ORDERED.len())
            }
            None => Self::ORDERED.len(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
