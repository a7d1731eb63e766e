//! Command surface - the async functions a UI layer calls.
//!
//! Every command takes the shared [`crate::context::AppContext`], logs its
//! execution, and returns a typed domain result. No command holds state of
//! its own.

pub mod advice;
pub mod import;
pub mod records;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;

pub use advice::{get_advice, get_feedback, suggest_category};
pub use import::{import_csv, migrate_legacy_json};
pub use records::{
    add_record, delete_record, get_all_records, get_records_by_category, get_records_by_date,
    get_records_by_range, update_record,
};
pub use stats::{get_category_breakdown, get_hourly_distribution, get_statistics, get_weekly_trend};
