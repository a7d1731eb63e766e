//! Bulk data importers

pub mod csv;

pub use csv::{CsvImporter, ImportReport};
