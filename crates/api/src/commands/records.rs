//! Record CRUD and listing commands

use std::sync::Arc;

use chrono::NaiveDate;
use routinelog_domain::{NewRecord, Record, RecordPatch, Result};
use tracing::info;

use crate::context::AppContext;

/// Validate and store a new record.
pub async fn add_record(ctx: &Arc<AppContext>, record: NewRecord) -> Result<Record> {
    info!(command = "records::add_record", activity = %record.activity, "executing");
    ctx.records.add_record(record).await
}

/// All records, most recently created first.
pub async fn get_all_records(ctx: &Arc<AppContext>) -> Result<Vec<Record>> {
    info!(command = "records::get_all_records", "executing");
    ctx.records.all_records().await
}

/// Records attributed to one date, ordered by start time.
pub async fn get_records_by_date(ctx: &Arc<AppContext>, date: NaiveDate) -> Result<Vec<Record>> {
    info!(command = "records::get_records_by_date", %date, "executing");
    ctx.records.records_for_date(date).await
}

/// Records between two dates inclusive, used by the calendar view.
pub async fn get_records_by_range(
    ctx: &Arc<AppContext>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Record>> {
    info!(command = "records::get_records_by_range", %start, %end, "executing");
    ctx.records.records_for_range(start, end).await
}

/// Records in one category, most recently created first.
pub async fn get_records_by_category(
    ctx: &Arc<AppContext>,
    category: &str,
) -> Result<Vec<Record>> {
    info!(command = "records::get_records_by_category", category, "executing");
    ctx.records.records_for_category(category).await
}

/// Apply a partial update. `Ok(false)` when the id is unknown or the patch
/// is empty.
pub async fn update_record(
    ctx: &Arc<AppContext>,
    id: &str,
    patch: RecordPatch,
) -> Result<bool> {
    info!(command = "records::update_record", id, "executing");
    ctx.records.update_record(id, patch).await
}

/// Delete by id. `Ok(false)` when the id does not exist.
pub async fn delete_record(ctx: &Arc<AppContext>, id: &str) -> Result<bool> {
    info!(command = "records::delete_record", id, "executing");
    ctx.records.delete_record(id).await
}
