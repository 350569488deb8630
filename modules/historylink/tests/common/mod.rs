//! Common test utilities: in-memory database, service wiring, sample records

#![allow(dead_code)]

use chrono::NaiveDateTime;
use historylink::config::Config;
use historylink::contract::{
    ImpactInput, NewImpact, NewRecord, Record, RecordFields, RecordStatus, RecordType,
    RecordUpdate,
};
use historylink::domain::Service;
use historylink::infra::storage::{
    Migrator, SeaOrmImpactHistoryRepository, SeaOrmLinkRepository, SeaOrmRecordRepository,
};
use historylink::HistorylinkModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Fresh migrated in-memory SQLite database.
///
/// A single pooled connection keeps every query on the same memory database.
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = match Database::connect(options).await {
        Ok(db) => db,
        Err(err) => panic!("failed to open in-memory database: {err}"),
    };
    if let Err(err) = Migrator::up(&db, None).await {
        panic!("migrations failed: {err}");
    }
    Arc::new(db)
}

pub fn build_service(db: Arc<DatabaseConnection>, config: Config) -> Arc<Service> {
    Arc::new(Service::new(
        Arc::new(SeaOrmRecordRepository::new(db.clone())),
        Arc::new(SeaOrmLinkRepository::new(db.clone())),
        Arc::new(SeaOrmImpactHistoryRepository::new(db)),
        config,
    ))
}

pub async fn setup_service() -> Arc<Service> {
    build_service(setup_db().await, Config::default())
}

/// Router with every historylink route mounted over a fresh database
pub async fn setup_router() -> axum::Router {
    let module = HistorylinkModule::default();
    if let Err(err) = module.init(setup_db().await, Config::default()) {
        panic!("module init failed: {err}");
    }
    match module.register_rest(axum::Router::new()) {
        Ok(router) => router,
        Err(err) => panic!("route registration failed: {err}"),
    }
}

/// Parse a `YYYYMMDDhhmm` date
pub fn date(value: &str) -> NaiveDateTime {
    match NaiveDateTime::parse_from_str(value, "%Y%m%d%H%M") {
        Ok(date) => date,
        Err(err) => panic!("bad test date {value}: {err}"),
    }
}

pub fn fields(title: &str, start: &str) -> RecordFields {
    RecordFields {
        title: title.to_string(),
        description: format!("About {title}"),
        location: Some("Europe".to_string()),
        significance: None,
        url: format!("https://example.org/{}", title.to_lowercase().replace(' ', "-")),
        start_date: Some(date(start)),
        end_date: Some(date(start)),
        record_type: RecordType::Event,
        status: RecordStatus::Draft,
    }
}

pub fn new_record(title: &str, start: &str, impacts: &[(&str, i16, i16)]) -> NewRecord {
    NewRecord {
        fields: fields(title, start),
        impacts: impacts
            .iter()
            .map(|(description, value, category)| NewImpact {
                description: description.to_string(),
                value: *value,
                category: *category,
            })
            .collect(),
    }
}

/// Update command that keeps the record's current fields and impacts
pub fn unchanged_update(record: &Record) -> RecordUpdate {
    RecordUpdate {
        id: record.id,
        fields: record.fields.clone(),
        impacts: record
            .impacts
            .iter()
            .map(|i| ImpactInput {
                id: Some(i.id),
                description: i.description.clone(),
                value: i.value,
                category: i.category,
            })
            .collect(),
    }
}

pub async fn create(service: &Service, record: NewRecord) -> Record {
    match service.create_record(record).await {
        Ok(record) => record,
        Err(err) => panic!("create_record failed: {err}"),
    }
}
