//! End-to-end repository tests against an on-disk SQLite database.

use std::sync::Arc;

use chrono::NaiveDate;
use routinelog_core::RecordRepository;
use routinelog_domain::{NewRecord, RecordPatch};
use routinelog_infra::database::migrate_from_json;
use routinelog_infra::{DbManager, SqliteRecordRepository};
use tempfile::TempDir;

fn setup() -> (Arc<SqliteRecordRepository>, Arc<DbManager>, TempDir) {
    let temp_dir = TempDir::new().expect("tempdir created");
    let db_path = temp_dir.path().join("routine.db");

    let manager = Arc::new(DbManager::new(&db_path, 4).expect("db manager created"));
    manager.run_migrations().expect("migrations run");

    let repository = Arc::new(SqliteRecordRepository::new(manager.clone()));
    (repository, manager, temp_dir)
}

fn new_record(activity: &str, start: &str, end: &str, date: NaiveDate) -> NewRecord {
    NewRecord {
        activity: activity.to_string(),
        category: "routine".to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        memo: None,
        date: Some(date),
    }
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

#[tokio::test(flavor = "multi_thread")]
async fn all_records_come_back_newest_first() {
    let (repository, _manager, _dir) = setup();
    let day = date("2025-06-01");

    for name in ["first", "second", "third"] {
        repository.add_record(new_record(name, "09:00", "09:30", day)).await.expect("added");
        // Distinct creation instants keep the ordering observable.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let records = repository.get_all_records().await.expect("listed");
    let names: Vec<&str> = records.iter().map(|r| r.activity.as_str()).collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn range_with_equal_endpoints_is_a_single_day() {
    let (repository, _manager, _dir) = setup();
    let day = date("2025-06-02");

    repository.add_record(new_record("inside", "08:00", "08:30", day)).await.expect("added");
    repository
        .add_record(new_record("outside", "08:00", "08:30", date("2025-06-03")))
        .await
        .expect("added");

    let records = repository.get_records_by_date_range(day, day).await.expect("listed");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].activity, "inside");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_of_missing_id_reports_false_and_changes_nothing() {
    let (repository, _manager, _dir) = setup();
    repository
        .add_record(new_record("keep", "08:00", "08:30", date("2025-06-01")))
        .await
        .expect("added");

    let deleted = repository.delete_record("no-such-id").await.expect("delete attempted");

    assert!(!deleted);
    assert_eq!(repository.get_all_records().await.expect("listed").len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_patch_never_reaches_the_database() {
    let (repository, _manager, _dir) = setup();
    let stored = repository
        .add_record(new_record("nap", "13:00", "13:30", date("2025-06-01")))
        .await
        .expect("added");

    let updated = repository.update_record(&stored.id, RecordPatch::default()).await.expect("update");

    assert!(!updated);
}

#[tokio::test(flavor = "multi_thread")]
async fn statistics_over_an_empty_store_are_zeroed() {
    let (repository, _manager, _dir) = setup();

    let summary = repository.get_statistics(None, None).await.expect("summary");

    assert_eq!(summary.total_records, 0);
    assert!(summary.category_stats.is_empty());
    assert!(summary.date_stats.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn legacy_migration_is_idempotent_alongside_repository_writes() {
    let (repository, manager, dir) = setup();
    let json_path = dir.path().join("daily_records.json");
    std::fs::write(
        &json_path,
        r#"{"records": [{"activity": "walk", "category": "exercise",
            "start_time": "18:00", "end_time": "18:40", "date": "2025-06-01"}]}"#,
    )
    .expect("legacy store written");

    let first = migrate_from_json(manager.clone(), json_path.clone()).await.expect("migration");
    assert_eq!(first, 1);

    let second = migrate_from_json(manager, json_path).await.expect("second migration");
    assert_eq!(second, 0);

    let records =
        repository.get_records_by_date(date("2025-06-01")).await.expect("listed");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].activity, "walk");
}
