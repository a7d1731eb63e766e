//! SQLite-backed record repository.
//!
//! Implements the async `RecordRepository` port over the shared r2d2
//! connection pool provided by `DbManager`. Queries run inside
//! `spawn_blocking` so the async executor never waits on SQLite.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate, Utc};
use routinelog_core::RecordRepository as RecordRepositoryPort;
use routinelog_domain::constants::{DATE_FORMAT, DATE_STATS_LIMIT};
use routinelog_domain::{
    CategoryCount, DateCount, NewRecord, Record, RecordPatch, Result as DomainResult,
    RoutineLogError, StatisticsSummary,
};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, ToSql};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use crate::errors::InfraError;

/// Async record repository backed by SQLite.
pub struct SqliteRecordRepository {
    db: Arc<DbManager>,
}

impl SqliteRecordRepository {
    /// Construct a repository backed by the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Borrow the underlying database manager.
    pub fn manager(&self) -> &Arc<DbManager> {
        &self.db
    }
}

#[async_trait]
impl RecordRepositoryPort for SqliteRecordRepository {
    async fn add_record(&self, record: NewRecord) -> DomainResult<Record> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> DomainResult<Record> {
            let conn = db.get_connection()?;
            let stored = build_record(record);
            insert_record(&conn, &stored).map_err(map_sql_error)?;
            Ok(stored)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_all_records(&self) -> DomainResult<Vec<Record>> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> DomainResult<Vec<Record>> {
            let conn = db.get_connection()?;
            query_records(&conn, SELECT_ALL_SQL, []).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_records_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Record>> {
        let db = Arc::clone(&self.db);
        let date = format_date(date);
        task::spawn_blocking(move || -> DomainResult<Vec<Record>> {
            let conn = db.get_connection()?;
            query_records(&conn, SELECT_BY_DATE_SQL, [&date as &dyn ToSql])
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_records_by_category(&self, category: &str) -> DomainResult<Vec<Record>> {
        let db = Arc::clone(&self.db);
        let category = category.to_string();
        task::spawn_blocking(move || -> DomainResult<Vec<Record>> {
            let conn = db.get_connection()?;
            query_records(&conn, SELECT_BY_CATEGORY_SQL, [&category as &dyn ToSql])
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_records_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Record>> {
        let db = Arc::clone(&self.db);
        let start = format_date(start);
        let end = format_date(end);
        task::spawn_blocking(move || -> DomainResult<Vec<Record>> {
            let conn = db.get_connection()?;
            query_records(&conn, SELECT_BY_RANGE_SQL, [&start as &dyn ToSql, &end])
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete_record(&self, id: &str) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let deleted =
                conn.execute(DELETE_RECORD_SQL, [&id]).map_err(map_sql_error)?;
            Ok(deleted > 0)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update_record(&self, id: &str, patch: RecordPatch) -> DomainResult<bool> {
        if patch.is_empty() {
            return Ok(false);
        }

        let db = Arc::clone(&self.db);
        let id = id.to_string();
        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            apply_patch(&conn, &id, patch).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_statistics(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> DomainResult<StatisticsSummary> {
        let db = Arc::clone(&self.db);
        let start = start.map(format_date);
        let end = end.map(format_date);
        task::spawn_blocking(move || -> DomainResult<StatisticsSummary> {
            let conn = db.get_connection()?;
            query_statistics(&conn, start, end).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

const INSERT_RECORD_SQL: &str = "INSERT INTO records (
        id, activity, category, start_time, end_time, memo, date, timestamp, created_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

const SELECT_ALL_SQL: &str = "SELECT id, activity, category, start_time, end_time, memo, date, timestamp, created_at
    FROM records
    ORDER BY timestamp DESC";

const SELECT_BY_DATE_SQL: &str = "SELECT id, activity, category, start_time, end_time, memo, date, timestamp, created_at
    FROM records
    WHERE date = ?1
    ORDER BY start_time ASC";

const SELECT_BY_CATEGORY_SQL: &str = "SELECT id, activity, category, start_time, end_time, memo, date, timestamp, created_at
    FROM records
    WHERE category = ?1
    ORDER BY timestamp DESC";

const SELECT_BY_RANGE_SQL: &str = "SELECT id, activity, category, start_time, end_time, memo, date, timestamp, created_at
    FROM records
    WHERE date BETWEEN ?1 AND ?2
    ORDER BY date ASC, start_time ASC";

const DELETE_RECORD_SQL: &str = "DELETE FROM records WHERE id = ?1";

fn build_record(record: NewRecord) -> Record {
    let date = record.date.unwrap_or_else(|| Local::now().date_naive());
    let now = Utc::now().to_rfc3339();

    Record {
        id: Uuid::new_v4().to_string(),
        activity: record.activity,
        category: record.category,
        start_time: record.start_time,
        end_time: record.end_time,
        memo: record.memo,
        date: format_date(date),
        timestamp: now.clone(),
        created_at: now,
    }
}

pub(crate) fn insert_record(conn: &Connection, record: &Record) -> rusqlite::Result<()> {
    let params: [&dyn ToSql; 9] = [
        &record.id,
        &record.activity,
        &record.category,
        &record.start_time,
        &record.end_time,
        &record.memo,
        &record.date,
        &record.timestamp,
        &record.created_at,
    ];

    conn.execute(INSERT_RECORD_SQL, params.as_slice())?;
    Ok(())
}

fn query_records<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> rusqlite::Result<Vec<Record>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map_record_row)?;
    rows.collect()
}

fn map_record_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        activity: row.get(1)?,
        category: row.get(2)?,
        start_time: row.get(3)?,
        end_time: row.get(4)?,
        memo: row.get(5)?,
        date: row.get(6)?,
        timestamp: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// Apply a partial update. An empty memo clears the stored value to NULL so
/// reads distinguish "cleared" from "never set".
fn apply_patch(conn: &Connection, id: &str, patch: RecordPatch) -> rusqlite::Result<bool> {
    let mut assignments: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(activity) = patch.activity {
        assignments.push("activity = ?");
        values.push(Value::Text(activity));
    }
    if let Some(category) = patch.category {
        assignments.push("category = ?");
        values.push(Value::Text(category));
    }
    if let Some(start_time) = patch.start_time {
        assignments.push("start_time = ?");
        values.push(Value::Text(start_time));
    }
    if let Some(end_time) = patch.end_time {
        assignments.push("end_time = ?");
        values.push(Value::Text(end_time));
    }
    if let Some(memo) = patch.memo {
        assignments.push("memo = ?");
        if memo.is_empty() {
            values.push(Value::Null);
        } else {
            values.push(Value::Text(memo));
        }
    }

    values.push(Value::Text(id.to_string()));
    let sql = format!("UPDATE records SET {} WHERE id = ?", assignments.join(", "));

    let updated = conn.execute(&sql, params_from_iter(values))?;
    Ok(updated > 0)
}

fn query_statistics(
    conn: &Connection,
    start: Option<String>,
    end: Option<String>,
) -> rusqlite::Result<StatisticsSummary> {
    let (where_clause, params) = build_window(start, end);

    let total_records: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM records{where_clause}"),
        params_from_iter(params.clone()),
        |row| row.get(0),
    )?;

    let category_sql = format!(
        "SELECT category, COUNT(*) as count
         FROM records{where_clause}
         GROUP BY category
         ORDER BY count DESC, category ASC"
    );
    let mut stmt = conn.prepare(&category_sql)?;
    let category_stats = stmt
        .query_map(params_from_iter(params.clone()), |row| {
            Ok(CategoryCount { category: row.get(0)?, count: row.get(1)? })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let date_sql = format!(
        "SELECT date, COUNT(*) as count
         FROM records{where_clause}
         GROUP BY date
         ORDER BY date DESC
         LIMIT {DATE_STATS_LIMIT}"
    );
    let mut stmt = conn.prepare(&date_sql)?;
    let date_stats = stmt
        .query_map(params_from_iter(params), |row| {
            Ok(DateCount { date: row.get(0)?, count: row.get(1)? })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(StatisticsSummary { total_records, category_stats, date_stats })
}

fn build_window(start: Option<String>, end: Option<String>) -> (String, Vec<Value>) {
    match (start, end) {
        (Some(start), Some(end)) => (
            " WHERE date BETWEEN ? AND ?".to_string(),
            vec![Value::Text(start), Value::Text(end)],
        ),
        (Some(start), None) => (" WHERE date >= ?".to_string(), vec![Value::Text(start)]),
        (None, Some(end)) => (" WHERE date <= ?".to_string(), vec![Value::Text(end)]),
        (None, None) => (String::new(), Vec::new()),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn map_sql_error(err: rusqlite::Error) -> RoutineLogError {
    RoutineLogError::from(InfraError::from(err))
}

fn map_join_error(err: task::JoinError) -> RoutineLogError {
    if err.is_cancelled() {
        RoutineLogError::Internal("blocking record repository task cancelled".into())
    } else {
        RoutineLogError::Internal(format!("blocking record repository task failed: {err}"))
    }
}
