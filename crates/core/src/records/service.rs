//! Record service - validation and orchestration over the repository port

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use routinelog_domain::constants::TIME_FORMAT;
use routinelog_domain::{
    NewRecord, Record, RecordPatch, Result, RoutineLogError, StatisticsSummary,
};
use tracing::debug;

use super::ports::RecordRepository;

/// Validating facade over the record repository.
///
/// Field validation lives here so every entry path (form, calendar, import)
/// shares it; the repository only sees well-formed payloads.
pub struct RecordService {
    repository: Arc<dyn RecordRepository>,
}

impl RecordService {
    /// Create a new record service.
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    /// Validate and insert a new record.
    pub async fn add_record(&self, record: NewRecord) -> Result<Record> {
        validate_new_record(&record)?;
        let stored = self.repository.add_record(record).await?;
        debug!(id = %stored.id, date = %stored.date, "record added");
        Ok(stored)
    }

    /// All records, most recently created first.
    pub async fn all_records(&self) -> Result<Vec<Record>> {
        self.repository.get_all_records().await
    }

    /// Records attributed to one date, ordered by start time.
    pub async fn records_for_date(&self, date: NaiveDate) -> Result<Vec<Record>> {
        self.repository.get_records_by_date(date).await
    }

    /// Records in one category, most recently created first.
    pub async fn records_for_category(&self, category: &str) -> Result<Vec<Record>> {
        if category.trim().is_empty() {
            return Err(RoutineLogError::InvalidInput("category must not be empty".into()));
        }
        self.repository.get_records_by_category(category).await
    }

    /// Records between two dates inclusive.
    pub async fn records_for_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Record>> {
        if start > end {
            return Err(RoutineLogError::InvalidInput(
                "start date must not be after end date".into(),
            ));
        }
        self.repository.get_records_by_date_range(start, end).await
    }

    /// Delete by id. `Ok(false)` when the id does not exist.
    pub async fn delete_record(&self, id: &str) -> Result<bool> {
        let deleted = self.repository.delete_record(id).await?;
        debug!(id, deleted, "record delete attempted");
        Ok(deleted)
    }

    /// Apply a partial update. `Ok(false)` for an empty patch.
    pub async fn update_record(&self, id: &str, patch: RecordPatch) -> Result<bool> {
        if patch.is_empty() {
            return Ok(false);
        }
        validate_patch(&patch)?;
        self.repository.update_record(id, patch).await
    }

    /// Store-wide counters, optionally restricted to a date window.
    pub async fn statistics(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<StatisticsSummary> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(RoutineLogError::InvalidInput(
                    "start date must not be after end date".into(),
                ));
            }
        }
        self.repository.get_statistics(start, end).await
    }
}

fn validate_new_record(record: &NewRecord) -> Result<()> {
    if record.activity.trim().is_empty() {
        return Err(RoutineLogError::InvalidInput("activity must not be empty".into()));
    }
    if record.category.trim().is_empty() {
        return Err(RoutineLogError::InvalidInput("category must not be empty".into()));
    }
    validate_time("start_time", &record.start_time)?;
    validate_time("end_time", &record.end_time)?;
    Ok(())
}

fn validate_patch(patch: &RecordPatch) -> Result<()> {
    if let Some(activity) = &patch.activity {
        if activity.trim().is_empty() {
            return Err(RoutineLogError::InvalidInput("activity must not be empty".into()));
        }
    }
    if let Some(start) = &patch.start_time {
        validate_time("start_time", start)?;
    }
    if let Some(end) = &patch.end_time {
        validate_time("end_time", end)?;
    }
    Ok(())
}

fn validate_time(field: &str, value: &str) -> Result<()> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map(|_| ())
        .map_err(|_| RoutineLogError::InvalidInput(format!("{field} must be HH:MM, got {value:?}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    /// In-memory repository double recording calls.
    #[derive(Default)]
    struct FakeRepository {
        records: Mutex<Vec<Record>>,
        update_calls: Mutex<usize>,
    }

    #[async_trait]
    impl RecordRepository for FakeRepository {
        async fn add_record(&self, record: NewRecord) -> Result<Record> {
            let date = record.date.unwrap_or_else(|| Utc::now().date_naive());
            let stored = Record {
                id: format!("rec-{}", self.records.lock().unwrap().len()),
                activity: record.activity,
                category: record.category,
                start_time: record.start_time,
                end_time: record.end_time,
                memo: record.memo,
                date: date.format("%Y-%m-%d").to_string(),
                timestamp: Utc::now().to_rfc3339(),
                created_at: Utc::now().to_rfc3339(),
            };
            self.records.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn get_all_records(&self) -> Result<Vec<Record>> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn get_records_by_date(&self, _date: NaiveDate) -> Result<Vec<Record>> {
            Ok(vec![])
        }

        async fn get_records_by_category(&self, _category: &str) -> Result<Vec<Record>> {
            Ok(vec![])
        }

        async fn get_records_by_date_range(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<Record>> {
            Ok(vec![])
        }

        async fn delete_record(&self, _id: &str) -> Result<bool> {
            Ok(false)
        }

        async fn update_record(&self, _id: &str, _patch: RecordPatch) -> Result<bool> {
            *self.update_calls.lock().unwrap() += 1;
            Ok(true)
        }

        async fn get_statistics(
            &self,
            _start: Option<NaiveDate>,
            _end: Option<NaiveDate>,
        ) -> Result<StatisticsSummary> {
            Ok(StatisticsSummary::default())
        }
    }

    fn new_record(activity: &str, start: &str, end: &str) -> NewRecord {
        NewRecord {
            activity: activity.to_string(),
            category: "routine".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            memo: None,
            date: None,
        }
    }

    #[tokio::test]
    async fn rejects_empty_activity() {
        let service = RecordService::new(Arc::new(FakeRepository::default()));

        let err = service.add_record(new_record("  ", "09:00", "10:00")).await.unwrap_err();
        assert!(matches!(err, RoutineLogError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn rejects_malformed_times() {
        let service = RecordService::new(Arc::new(FakeRepository::default()));

        let err = service.add_record(new_record("run", "9am", "10:00")).await.unwrap_err();
        assert!(matches!(err, RoutineLogError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn empty_patch_is_a_no_op() {
        let repository = Arc::new(FakeRepository::default());
        let service = RecordService::new(repository.clone());

        let updated = service.update_record("rec-0", RecordPatch::default()).await.unwrap();

        assert!(!updated);
        assert_eq!(*repository.update_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn memo_only_patch_reaches_repository() {
        let repository = Arc::new(FakeRepository::default());
        let service = RecordService::new(repository.clone());

        let patch = RecordPatch { memo: Some(String::new()), ..RecordPatch::default() };
        let updated = service.update_record("rec-0", patch).await.unwrap();

        assert!(updated);
        assert_eq!(*repository.update_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let service = RecordService::new(Arc::new(FakeRepository::default()));
        let start = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let err = service.records_for_range(start, end).await.unwrap_err();
        assert!(matches!(err, RoutineLogError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn valid_record_is_stored() {
        let service = RecordService::new(Arc::new(FakeRepository::default()));

        let stored = service.add_record(new_record("run", "07:00", "07:45")).await.unwrap();

        assert_eq!(stored.activity, "run");
        assert!(!stored.id.is_empty());
    }
}
