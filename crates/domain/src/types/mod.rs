//! Domain types shared across crates

pub mod advice;
pub mod record;
pub mod stats;

pub use advice::*;
pub use record::*;
pub use stats::*;
