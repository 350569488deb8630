//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs
//!
//! Writes that touch several tables run in a single transaction inside the
//! implementation. Domain failures detected mid-transaction are returned as
//! `HistoryError` wrapped in `anyhow::Error`.

use crate::contract::{ImpactHistoryEntry, Link, NewLink, NewRecord, Record, RecordUpdate};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for records and their impacts
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Insert a record with its impacts and `created` history entries
    async fn create(&self, record: &NewRecord) -> Result<Record>;

    /// Find a record with its impacts
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Record>>;

    /// Check if a record exists
    async fn exists(&self, id: Uuid) -> Result<bool>;

    /// Reconcile the record and its impacts. `None` when the record is missing.
    async fn update(&self, update: &RecordUpdate) -> Result<Option<Record>>;

    /// Delete a record, its impacts and every link touching it.
    /// `false` when the record is missing.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// List records with their impacts, ordered by start date
    async fn list_page(&self, limit: u64, offset: u64) -> Result<Vec<Record>>;

    /// Count all records
    async fn count(&self) -> Result<u64>;
}

/// Repository for links between records
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Insert a link after checking, in the same transaction, that both
    /// records exist and no link joins them in either direction
    async fn create(&self, link: &NewLink) -> Result<Link>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Link>>;

    /// All links touching a record, on either side
    async fn find_by_record(&self, record_id: Uuid) -> Result<Vec<Link>>;

    /// Change a link's strength. `None` when the link is missing.
    async fn update_strength(&self, id: Uuid, strength: i16) -> Result<Option<Link>>;

    /// `false` when the link is missing
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Read side of the impact history log
#[async_trait]
pub trait ImpactHistoryRepository: Send + Sync {
    /// History of a record's impacts, newest first
    async fn list_for_record(
        &self,
        record_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ImpactHistoryEntry>>;

    async fn count_for_record(&self, record_id: Uuid) -> Result<u64>;
}
