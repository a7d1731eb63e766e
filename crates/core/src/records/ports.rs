//! Port interfaces for record storage
//!
//! These traits define the boundary between core business logic and the
//! SQLite-backed infrastructure implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use routinelog_domain::{NewRecord, Record, RecordPatch, Result, StatisticsSummary};

/// Trait for persisting and querying activity records.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Insert a new record, generating its id and creation timestamp.
    async fn add_record(&self, record: NewRecord) -> Result<Record>;

    /// All records, most recently created first.
    async fn get_all_records(&self) -> Result<Vec<Record>>;

    /// Records attributed to one date, ordered by start time.
    async fn get_records_by_date(&self, date: NaiveDate) -> Result<Vec<Record>>;

    /// Records in one category, most recently created first.
    async fn get_records_by_category(&self, category: &str) -> Result<Vec<Record>>;

    /// Records between two dates inclusive, ordered by `(date, start_time)`.
    async fn get_records_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Record>>;

    /// Delete by id. `Ok(false)` when no record carries that id.
    async fn delete_record(&self, id: &str) -> Result<bool>;

    /// Apply a partial update. `Ok(false)` when the patch supplies nothing.
    async fn update_record(&self, id: &str, patch: RecordPatch) -> Result<bool>;

    /// Store-wide counters, optionally restricted to a date window.
    async fn get_statistics(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<StatisticsSummary>;
}
