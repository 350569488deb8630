//! Module declaration and lifecycle: init, migrate, REST registration

use crate::config::Config;
use crate::domain::Service;
use crate::infra::storage::{
    Migrator, SeaOrmImpactHistoryRepository, SeaOrmLinkRepository, SeaOrmRecordRepository,
};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Historylink module
#[derive(Default)]
pub struct HistorylinkModule {
    service: RwLock<Option<Arc<Service>>>,
}

impl HistorylinkModule {
    /// Wire repositories and the domain service over `db`
    pub fn init(&self, db: Arc<DatabaseConnection>, config: Config) -> Result<()> {
        let record_repo = Arc::new(SeaOrmRecordRepository::new(db.clone()));
        let link_repo = Arc::new(SeaOrmLinkRepository::new(db.clone()));
        let history_repo = Arc::new(SeaOrmImpactHistoryRepository::new(db));

        tracing::info!(
            default_page_size = config.default_page_size,
            max_page_size = config.max_page_size,
            "Historylink module initialized"
        );
        let service = Arc::new(Service::new(record_repo, link_repo, history_repo, config));
        *self.service.write() = Some(service);
        Ok(())
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Historylink migrations completed");
        Ok(())
    }

    /// The initialized domain service
    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// Mount the REST API on `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;

        tracing::info!("Registering historylink REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }
}
