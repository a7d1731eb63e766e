//! Database implementations

pub mod json_migration;
pub mod manager;
pub mod record_repository;

pub use json_migration::migrate_from_json;
pub use manager::DbManager;
pub use record_repository::SqliteRecordRepository;
