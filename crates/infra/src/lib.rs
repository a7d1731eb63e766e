//! # RoutineLog Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite-backed record storage and schema migrations
//! - The HTTP client and the OpenAI advisor gateway
//! - Configuration loading (environment variables, JSON/TOML files)
//! - Legacy data importers (flat-file JSON, CSV exports)
//!
//! ## Architecture
//! - Implements traits defined in `routinelog-core`
//! - Contains all "impure" code (I/O, network, clocks)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod import;
pub mod integrations;

// Re-export commonly used items
pub use database::{DbManager, SqliteRecordRepository};
pub use errors::InfraError;
pub use http::HttpClient;
pub use import::{CsvImporter, ImportReport};
pub use integrations::openai::OpenAiClient;
