//! Application context - dependency injection container

use std::sync::Arc;

use routinelog_core::{AdvisorGateway, AdvisorService, RecordRepository, RecordService};
use routinelog_domain::{Config, Result};
use routinelog_infra::{CsvImporter, DbManager, OpenAiClient, SqliteRecordRepository};
use tracing::info;

/// Application context - holds all services and dependencies.
///
/// Wiring is fixed at construction: the SQLite repository backs the record
/// service and the CSV importer, the OpenAI client backs the advisor
/// service. Commands receive the context behind an `Arc` and never build
/// adapters themselves.
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub records: Arc<RecordService>,
    pub advisor: Arc<AdvisorService>,
    pub csv_importer: CsvImporter,
}

impl AppContext {
    /// Build the full dependency graph from configuration.
    ///
    /// Runs schema migrations before handing out the context, so every
    /// service sees a ready database.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let repository: Arc<dyn RecordRepository> =
            Arc::new(SqliteRecordRepository::new(db.clone()));
        let records = Arc::new(RecordService::new(repository.clone()));
        let csv_importer = CsvImporter::new(repository);

        let gateway: Arc<dyn AdvisorGateway> = Arc::new(OpenAiClient::new(&config.advisor)?);
        let advisor = Arc::new(AdvisorService::new(gateway));

        info!(
            db_path = %config.database.path,
            advisor_enabled = config.advisor.api_key.is_some(),
            "application context initialized"
        );

        Ok(Self { config, db, records, advisor, csv_importer })
    }
}

#[cfg(test)]
mod tests {
    use routinelog_domain::DatabaseConfig;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn context_builds_and_serves_records() {
        let temp_dir = TempDir::new().expect("tempdir created");
        let db_path = temp_dir.path().join("routine.db");
        let config = Config {
            database: DatabaseConfig {
                path: db_path.to_string_lossy().into_owned(),
                pool_size: 2,
            },
            advisor: Default::default(),
            import: Default::default(),
        };

        let ctx = AppContext::new(config).expect("context built");

        let records = ctx.records.all_records().await.expect("records listed");
        assert!(records.is_empty());
        assert!(ctx.db.health_check().is_ok());
    }
}
