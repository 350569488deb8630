//! Domain service - business logic orchestration

use crate::config::Config;
use crate::contract::{
    HistoryError, ImpactHistoryEntry, Link, NewLink, NewRecord, Page, Record, RecordUpdate,
};
use super::paging::PageWindow;
use super::repository::{ImpactHistoryRepository, LinkRepository, RecordRepository};
use super::validation;
use std::sync::Arc;
use uuid::Uuid;

/// Domain service for records, links and impact history
pub struct Service {
    record_repo: Arc<dyn RecordRepository>,
    link_repo: Arc<dyn LinkRepository>,
    history_repo: Arc<dyn ImpactHistoryRepository>,
    config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        record_repo: Arc<dyn RecordRepository>,
        link_repo: Arc<dyn LinkRepository>,
        history_repo: Arc<dyn ImpactHistoryRepository>,
        config: Config,
    ) -> Self {
        Self {
            record_repo,
            link_repo,
            history_repo,
            config,
        }
    }

    // ===== Record Operations =====

    /// Field rules a new record must satisfy
    pub fn check_new_record(&self, record: &NewRecord) -> Result<(), HistoryError> {
        validation::validate_new_record(record, self.config.max_text_length)
    }

    /// Field rules a record update must satisfy
    pub fn check_record_update(&self, update: &RecordUpdate) -> Result<(), HistoryError> {
        validation::validate_record_update(update, self.config.max_text_length)
    }

    /// Create a record together with its impacts
    pub async fn create_record(&self, record: NewRecord) -> Result<Record, HistoryError> {
        self.check_new_record(&record)?;

        let created = self
            .record_repo
            .create(&record)
            .await
            .map_err(HistoryError::from_repository)?;

        tracing::debug!(
            record_id = %created.id,
            impacts = created.impacts.len(),
            "record created"
        );
        Ok(created)
    }

    /// Get a record with its impacts
    pub async fn get_record(&self, id: Uuid) -> Result<Record, HistoryError> {
        self.record_repo
            .find_by_id(id)
            .await
            .map_err(HistoryError::from_repository)?
            .ok_or_else(|| HistoryError::record_not_found(id))
    }

    /// Replace a record's fields and reconcile its impacts
    pub async fn update_record(&self, update: RecordUpdate) -> Result<Record, HistoryError> {
        self.check_record_update(&update)?;

        let updated = self
            .record_repo
            .update(&update)
            .await
            .map_err(HistoryError::from_repository)?
            .ok_or_else(|| HistoryError::record_not_found(update.id))?;

        tracing::debug!(record_id = %updated.id, "record updated");
        Ok(updated)
    }

    /// Delete a record, its impacts and its links
    pub async fn delete_record(&self, id: Uuid) -> Result<(), HistoryError> {
        let deleted = self
            .record_repo
            .delete(id)
            .await
            .map_err(HistoryError::from_repository)?;

        if !deleted {
            return Err(HistoryError::record_not_found(id));
        }
        tracing::debug!(record_id = %id, "record deleted");
        Ok(())
    }

    /// Page through records
    pub async fn get_records_paged(
        &self,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Page<Record>, HistoryError> {
        let window = PageWindow::resolve(page, page_size, &self.config)?;

        let items = self
            .record_repo
            .list_page(window.limit(), window.offset())
            .await
            .map_err(HistoryError::from_repository)?;
        let total = self
            .record_repo
            .count()
            .await
            .map_err(HistoryError::from_repository)?;

        Ok(Page {
            page: window.page,
            size: window.size,
            total,
            items,
        })
    }

    // ===== Link Operations =====

    /// Link `record_id` to `target_id`
    pub async fn create_link(
        &self,
        record_id: Uuid,
        target_id: Uuid,
        strength: i16,
    ) -> Result<Link, HistoryError> {
        if record_id == target_id {
            return Err(HistoryError::LinkToItself);
        }

        // Existence and uniqueness are checked by the repository inside its write
        let link = self
            .link_repo
            .create(&NewLink {
                record_id,
                record_id2: target_id,
                strength,
            })
            .await
            .map_err(HistoryError::from_repository)?;

        tracing::debug!(link_id = %link.id, %record_id, %target_id, "link created");
        Ok(link)
    }

    /// Get a link by id
    pub async fn get_link(&self, id: Uuid) -> Result<Link, HistoryError> {
        self.link_repo
            .find_by_id(id)
            .await
            .map_err(HistoryError::from_repository)?
            .ok_or_else(|| HistoryError::link_not_found(id))
    }

    /// All links touching a record
    pub async fn get_links_by_record(&self, record_id: Uuid) -> Result<Vec<Link>, HistoryError> {
        self.validate_record_exists(record_id).await?;

        self.link_repo
            .find_by_record(record_id)
            .await
            .map_err(HistoryError::from_repository)
    }

    /// Change a link's strength
    pub async fn update_link(&self, id: Uuid, strength: i16) -> Result<Link, HistoryError> {
        self.link_repo
            .update_strength(id, strength)
            .await
            .map_err(HistoryError::from_repository)?
            .ok_or_else(|| HistoryError::link_not_found(id))
    }

    /// Delete a link
    pub async fn delete_link(&self, id: Uuid) -> Result<(), HistoryError> {
        let deleted = self
            .link_repo
            .delete(id)
            .await
            .map_err(HistoryError::from_repository)?;

        if !deleted {
            return Err(HistoryError::link_not_found(id));
        }
        Ok(())
    }

    // ===== History Operations =====

    /// Page through the impact history of a record, newest first.
    ///
    /// History outlives the record, so an unknown id yields an empty page.
    pub async fn get_impact_history(
        &self,
        record_id: Uuid,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Page<ImpactHistoryEntry>, HistoryError> {
        let window = PageWindow::resolve(page, page_size, &self.config)?;

        let items = self
            .history_repo
            .list_for_record(record_id, window.limit(), window.offset())
            .await
            .map_err(HistoryError::from_repository)?;
        let total = self
            .history_repo
            .count_for_record(record_id)
            .await
            .map_err(HistoryError::from_repository)?;

        Ok(Page {
            page: window.page,
            size: window.size,
            total,
            items,
        })
    }

    // ===== Helper Methods =====

    /// Validate that a record exists
    async fn validate_record_exists(&self, id: Uuid) -> Result<(), HistoryError> {
        if !self
            .record_repo
            .exists(id)
            .await
            .map_err(HistoryError::from_repository)?
        {
            return Err(HistoryError::record_not_found(id));
        }
        Ok(())
    }
}
