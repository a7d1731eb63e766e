//! RoutineLog - personal routine tracking.
//!
//! Binary entry point: initialises logging and configuration, builds the
//! application context, migrates the legacy store when configured, and
//! prints a statistics summary.

use std::sync::Arc;

use routinelog_lib::{commands, AppContext};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging first so .env loading is visible.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => warn!(%err, "no .env file loaded"),
    }

    let config = routinelog_infra::config::load()?;
    let ctx = Arc::new(AppContext::new(config)?);

    let migrated = commands::migrate_legacy_json(&ctx).await?;
    if migrated > 0 {
        info!(migrated, "migrated records from the legacy JSON store");
    }

    let summary = commands::get_statistics(&ctx, None, None).await?;
    println!("RoutineLog: {} records stored", summary.total_records);
    for entry in &summary.category_stats {
        println!("  {}: {}", entry.category, entry.count);
    }

    Ok(())
}
