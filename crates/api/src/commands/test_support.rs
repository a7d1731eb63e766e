//! Shared fixtures for command tests.

use std::sync::Arc;

use routinelog_domain::{Config, DatabaseConfig};
use tempfile::TempDir;

use crate::context::AppContext;

/// Context backed by a throwaway database; the advisor has no API key, so
/// advisor commands resolve to fallbacks without touching the network.
pub fn test_context() -> (Arc<AppContext>, TempDir) {
    let temp_dir = TempDir::new().expect("tempdir created");
    let db_path = temp_dir.path().join("routine.db");
    let config = Config {
        database: DatabaseConfig { path: db_path.to_string_lossy().into_owned(), pool_size: 2 },
        advisor: Default::default(),
        import: Default::default(),
    };

    let ctx = AppContext::new(config).expect("context built");
    (Arc::new(ctx), temp_dir)
}
