//! One-shot migration from the legacy flat-file JSON store.
//!
//! The legacy store is a single JSON document with a top-level `records`
//! array. Field names were never fully consistent across versions, so every
//! field is optional and the combined `"HH:MM - HH:MM"` time form is
//! accepted alongside split start/end fields.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, Utc};
use routinelog_domain::{Result as DomainResult, RoutineLogError};
use rusqlite::Connection;
use serde::Deserialize;
use tokio::task;
use tracing::{info, warn};
use uuid::Uuid;

use super::manager::DbManager;
use super::record_repository::insert_record;
use crate::errors::InfraError;

#[derive(Debug, Deserialize)]
struct LegacyStore {
    #[serde(default)]
    records: Vec<LegacyRecord>,
}

#[derive(Debug, Deserialize)]
struct LegacyRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    activity: Option<String>,
    #[serde(default)]
    category: Option<String>,
    /// Combined `"HH:MM - HH:MM"` form used by the oldest store versions.
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    memo: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

/// Migrate records from a legacy JSON store into the database.
///
/// A missing file is not an error and migrates zero records. Records already
/// present (same date, activity, start and end time) are skipped, so running
/// the migration twice imports nothing the second time.
pub async fn migrate_from_json(db: Arc<DbManager>, path: PathBuf) -> DomainResult<usize> {
    task::spawn_blocking(move || -> DomainResult<usize> {
        if !path.exists() {
            return Ok(0);
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            RoutineLogError::Internal(format!("failed to read legacy store: {e}"))
        })?;
        let store: LegacyStore = serde_json::from_str(&contents)
            .map_err(|e| RoutineLogError::Parse(format!("invalid legacy store: {e}")))?;

        let conn = db.get_connection()?;
        let mut migrated = 0;
        for legacy in store.records {
            if migrate_one(&conn, legacy).map_err(map_sql_error)? {
                migrated += 1;
            }
        }

        info!(path = %path.display(), migrated, "legacy JSON migration finished");
        Ok(migrated)
    })
    .await
    .map_err(|err| RoutineLogError::Internal(format!("blocking migration task failed: {err}")))?
}

fn migrate_one(conn: &Connection, legacy: LegacyRecord) -> rusqlite::Result<bool> {
    let record = normalize(legacy);

    if is_duplicate(conn, &record)? {
        return Ok(false);
    }

    match insert_record(conn, &record) {
        Ok(()) => Ok(true),
        // Duplicate legacy ids are skipped rather than failing the batch.
        Err(rusqlite::Error::SqliteFailure(err, message))
            if err.code == rusqlite::ffi::ErrorCode::ConstraintViolation =>
        {
            warn!(id = %record.id, ?message, "skipping legacy record with duplicate id");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

fn normalize(legacy: LegacyRecord) -> routinelog_domain::Record {
    let (mut start_time, mut end_time) = match legacy.time.as_deref() {
        Some(time) => match time.split_once(" - ") {
            Some((start, end)) => (start.to_string(), end.to_string()),
            None => (time.to_string(), time.to_string()),
        },
        None => (String::new(), String::new()),
    };
    if let Some(start) = legacy.start_time {
        start_time = start;
    }
    if let Some(end) = legacy.end_time {
        end_time = end;
    }

    let timestamp = legacy.timestamp.unwrap_or_else(|| Utc::now().to_rfc3339());

    routinelog_domain::Record {
        id: legacy.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        activity: legacy.activity.unwrap_or_default(),
        category: legacy.category.unwrap_or_else(|| "other".to_string()),
        start_time,
        end_time,
        memo: legacy.memo.filter(|m| !m.is_empty()),
        date: legacy
            .date
            .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string()),
        timestamp: timestamp.clone(),
        created_at: timestamp,
    }
}

fn is_duplicate(conn: &Connection, record: &routinelog_domain::Record) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM records
         WHERE date = ?1 AND activity = ?2 AND start_time = ?3 AND end_time = ?4",
        [&record.date, &record.activity, &record.start_time, &record.end_time],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn map_sql_error(err: rusqlite::Error) -> RoutineLogError {
    RoutineLogError::from(InfraError::from(err))
}
