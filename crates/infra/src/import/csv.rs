//! CSV record import.
//!
//! Reads exported record files with the columns `date`, `time` (combined
//! `"start-end"` range), `activity`, `category`, and an optional `memo`.
//! Rows are inserted through the record repository one at a time; there is
//! no wrapping transaction, so a failed row leaves earlier rows in place.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use routinelog_core::RecordRepository;
use routinelog_domain::constants::DATE_FORMAT;
use routinelog_domain::{NewRecord, Result as DomainResult, RoutineLogError};
use serde::Deserialize;
use tracing::{info, warn};

/// Outcome counts of one CSV import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows inserted.
    pub imported: usize,
    /// Rows skipped because an equal `(date, activity, start_time)` record
    /// already exists.
    pub duplicates: usize,
    /// Rows dropped for malformed data (bad date, missing time separator,
    /// undecodable row) or a failed insert.
    pub errors: usize,
    /// Data rows read from the file.
    pub total: usize,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    /// Combined `"HH:MM-HH:MM"` range, split on the first `-`.
    time: String,
    activity: String,
    category: String,
    #[serde(default)]
    memo: Option<String>,
}

/// Imports CSV record exports through the record repository port.
pub struct CsvImporter {
    repository: Arc<dyn RecordRepository>,
}

impl CsvImporter {
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    /// Import every row of the CSV file at `path`.
    ///
    /// Duplicates are detected against records already stored for the row's
    /// date, keyed on `(activity, start_time)`; rows imported earlier in the
    /// same run count as stored.
    pub async fn import_path(&self, path: &Path) -> DomainResult<ImportReport> {
        let mut reader = csv::Reader::from_path(path).map_err(|err| {
            RoutineLogError::InvalidInput(format!("cannot read CSV file: {err}"))
        })?;

        let mut report = ImportReport::default();
        // Per-date cache of (activity, start_time) keys already stored.
        let mut seen: HashMap<String, HashSet<(String, String)>> = HashMap::new();

        for row in reader.deserialize::<CsvRow>() {
            report.total += 1;
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    warn!(row = report.total, error = %err, "undecodable CSV row");
                    report.errors += 1;
                    continue;
                }
            };

            match self.import_row(row, &mut seen).await? {
                RowOutcome::Imported => report.imported += 1,
                RowOutcome::Duplicate => report.duplicates += 1,
                RowOutcome::Malformed => report.errors += 1,
            }
        }

        info!(
            path = %path.display(),
            imported = report.imported,
            duplicates = report.duplicates,
            errors = report.errors,
            "CSV import finished"
        );
        Ok(report)
    }

    async fn import_row(
        &self,
        row: CsvRow,
        seen: &mut HashMap<String, HashSet<(String, String)>>,
    ) -> DomainResult<RowOutcome> {
        let Some((start, end)) = row.time.split_once('-') else {
            warn!(date = %row.date, time = %row.time, "CSV row without time separator");
            return Ok(RowOutcome::Malformed);
        };
        let start_time = start.trim().to_string();
        let end_time = end.trim().to_string();

        let date_str = row.date.trim().to_string();
        let Ok(date) = NaiveDate::parse_from_str(&date_str, DATE_FORMAT) else {
            warn!(date = %date_str, "CSV row with unparseable date");
            return Ok(RowOutcome::Malformed);
        };

        if !seen.contains_key(&date_str) {
            let stored = self.repository.get_records_by_date(date).await?;
            let keys =
                stored.into_iter().map(|r| (r.activity, r.start_time)).collect::<HashSet<_>>();
            seen.insert(date_str.clone(), keys);
        }
        let keys = seen.entry(date_str).or_default();

        let key = (row.activity.trim().to_string(), start_time.clone());
        if keys.contains(&key) {
            return Ok(RowOutcome::Duplicate);
        }

        let record = NewRecord {
            activity: key.0.clone(),
            category: row.category.trim().to_string(),
            start_time,
            end_time,
            memo: row.memo.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()),
            date: Some(date),
        };
        self.repository.add_record(record).await?;
        keys.insert(key);
        Ok(RowOutcome::Imported)
    }
}

enum RowOutcome {
    Imported,
    Duplicate,
    Malformed,
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::database::{DbManager, SqliteRecordRepository};

    const SAMPLE_CSV: &str = "\
date,time,activity,category,memo
2025-06-01,07:00-07:45,run,exercise,5k
2025-06-01,08:00-08:30,breakfast,meal,
2025-06-02,23:00-07:00,sleep,sleep,slept well
";

    #[tokio::test(flavor = "multi_thread")]
    async fn imports_rows_and_splits_time_range() {
        let (importer, repository, dir) = setup();
        let csv_path = dir.path().join("records.csv");
        std::fs::write(&csv_path, SAMPLE_CSV).expect("csv written");

        let report = importer.import_path(&csv_path).await.expect("import");

        assert_eq!(
            report,
            ImportReport { imported: 3, duplicates: 0, errors: 0, total: 3 }
        );

        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let records = repository.get_records_by_date(date).await.expect("records");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].start_time, "07:00");
        assert_eq!(records[0].end_time, "07:45");
        assert_eq!(records[1].memo, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn second_import_counts_every_row_as_duplicate() {
        let (importer, _repository, dir) = setup();
        let csv_path = dir.path().join("records.csv");
        std::fs::write(&csv_path, SAMPLE_CSV).expect("csv written");

        importer.import_path(&csv_path).await.expect("first import");
        let report = importer.import_path(&csv_path).await.expect("second import");

        assert_eq!(
            report,
            ImportReport { imported: 0, duplicates: 3, errors: 0, total: 3 }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn in_batch_duplicates_are_skipped() {
        let (importer, repository, dir) = setup();
        let csv_path = dir.path().join("records.csv");
        let csv = "\
date,time,activity,category,memo
2025-06-01,07:00-07:45,run,exercise,
2025-06-01,07:00-08:00,run,exercise,same start
";
        std::fs::write(&csv_path, csv).expect("csv written");

        let report = importer.import_path(&csv_path).await.expect("import");

        assert_eq!(report.imported, 1);
        assert_eq!(report.duplicates, 1);

        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let records = repository.get_records_by_date(date).await.expect("records");
        assert_eq!(records.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn malformed_rows_count_as_errors() {
        let (importer, _repository, dir) = setup();
        let csv_path = dir.path().join("records.csv");
        let csv = "\
date,time,activity,category,memo
2025-06-01,0700 0745,run,exercise,no separator
not-a-date,07:00-07:45,run,exercise,
2025-06-01,07:00-07:45,run,exercise,
";
        std::fs::write(&csv_path, csv).expect("csv written");

        let report = importer.import_path(&csv_path).await.expect("import");

        assert_eq!(
            report,
            ImportReport { imported: 1, duplicates: 0, errors: 2, total: 3 }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_file_is_an_input_error() {
        let (importer, _repository, dir) = setup();

        let result = importer.import_path(&dir.path().join("absent.csv")).await;

        assert!(matches!(result, Err(RoutineLogError::InvalidInput(_))));
    }

    fn setup() -> (CsvImporter, Arc<SqliteRecordRepository>, TempDir) {
        let temp_dir = TempDir::new().expect("tempdir created");
        let db_path = temp_dir.path().join("routine.db");

        let manager = Arc::new(DbManager::new(&db_path, 4).expect("db manager created"));
        manager.run_migrations().expect("migrations run");

        let repository = Arc::new(SqliteRecordRepository::new(manager));
        let importer = CsvImporter::new(repository.clone());
        (importer, repository, temp_dir)
    }
}
