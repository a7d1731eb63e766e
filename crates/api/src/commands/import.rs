//! Data import commands

use std::path::Path;
use std::sync::Arc;

use routinelog_domain::Result;
use routinelog_infra::database::migrate_from_json;
use routinelog_infra::ImportReport;
use tracing::info;

use crate::context::AppContext;

/// Import a CSV record export. Reports per-row outcomes instead of failing
/// the batch.
pub async fn import_csv(ctx: &Arc<AppContext>, path: &Path) -> Result<ImportReport> {
    info!(command = "import::import_csv", path = %path.display(), "executing");
    ctx.csv_importer.import_path(path).await
}

/// Migrate the legacy flat-file JSON store named in the configuration.
///
/// Returns the number of migrated records; zero when no path is configured,
/// the file is absent, or everything was migrated before.
pub async fn migrate_legacy_json(ctx: &Arc<AppContext>) -> Result<usize> {
    let Some(path) = ctx.config.import.legacy_json_path.clone() else {
        return Ok(0);
    };

    info!(command = "import::migrate_legacy_json", path = %path, "executing");
    migrate_from_json(ctx.db.clone(), path.into()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::test_context;

    #[tokio::test(flavor = "multi_thread")]
    async fn csv_import_lands_in_the_record_store() {
        let (ctx, dir) = test_context();
        let csv_path = dir.path().join("records.csv");
        std::fs::write(
            &csv_path,
            "date,time,activity,category,memo\n2025-06-01,07:00-07:45,run,exercise,5k\n",
        )
        .expect("csv written");

        let report = import_csv(&ctx, &csv_path).await.expect("import");
        assert_eq!(report.imported, 1);

        let records = ctx.records.all_records().await.expect("records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2025-06-01");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn migration_without_configured_path_is_a_no_op() {
        let (ctx, _dir) = test_context();

        let migrated = migrate_legacy_json(&ctx).await.expect("migration");
        assert_eq!(migrated, 0);
    }
}
