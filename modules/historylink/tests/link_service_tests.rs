//! Link service tests over in-memory mock repositories

use historylink::config::Config;
use historylink::contract::*;
use historylink::domain::repository::{ImpactHistoryRepository, LinkRepository, RecordRepository};
use historylink::domain::Service;
use std::sync::Arc;
use uuid::Uuid;

// Mock repository implementations for testing
pub mod mocks {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::RwLock;
    use std::collections::HashMap;

    /// Record store that only tracks ids; links need nothing more
    #[derive(Clone, Default)]
    pub struct MockRecordRepo {
        data: Arc<RwLock<HashMap<Uuid, Record>>>,
    }

    impl MockRecordRepo {
        pub fn insert_blank(&self) -> Uuid {
            let id = Uuid::new_v4();
            let record = Record {
                id,
                fields: RecordFields {
                    title: "Blank".to_string(),
                    description: "Blank".to_string(),
                    location: None,
                    significance: None,
                    url: "https://example.org".to_string(),
                    start_date: None,
                    end_date: None,
                    record_type: RecordType::Object,
                    status: RecordStatus::Draft,
                },
                impacts: Vec::new(),
            };
            self.data.write().insert(id, record);
            id
        }
    }

    #[async_trait]
    impl RecordRepository for MockRecordRepo {
        async fn create(&self, record: &NewRecord) -> anyhow::Result<Record> {
            let created = Record {
                id: Uuid::new_v4(),
                fields: record.fields.clone(),
                impacts: Vec::new(),
            };
            self.data.write().insert(created.id, created.clone());
            Ok(created)
        }

        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Record>> {
            Ok(self.data.read().get(&id).cloned())
        }

        async fn exists(&self, id: Uuid) -> anyhow::Result<bool> {
            Ok(self.data.read().contains_key(&id))
        }

        async fn update(&self, update: &RecordUpdate) -> anyhow::Result<Option<Record>> {
            let mut data = self.data.write();
            Ok(data.get_mut(&update.id).map(|record| {
                record.fields = update.fields.clone();
                record.clone()
            }))
        }

        async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
            Ok(self.data.write().remove(&id).is_some())
        }

        async fn list_page(&self, limit: u64, offset: u64) -> anyhow::Result<Vec<Record>> {
            Ok(self
                .data
                .read()
                .values()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn count(&self) -> anyhow::Result<u64> {
            Ok(self.data.read().len() as u64)
        }
    }

    /// Link store that checks its endpoints against a shared record store
    #[derive(Clone)]
    pub struct MockLinkRepo {
        records: MockRecordRepo,
        data: Arc<RwLock<HashMap<Uuid, Link>>>,
    }

    impl MockLinkRepo {
        pub fn new(records: MockRecordRepo) -> Self {
            Self {
                records,
                data: Arc::default(),
            }
        }

        pub fn count(&self) -> usize {
            self.data.read().len()
        }
    }

    #[async_trait]
    impl LinkRepository for MockLinkRepo {
        async fn create(&self, link: &NewLink) -> anyhow::Result<Link> {
            for id in [link.record_id, link.record_id2] {
                if !self.records.exists(id).await? {
                    return Err(HistoryError::record_not_found(id).into());
                }
            }

            let mut data = self.data.write();
            if data
                .values()
                .any(|l| l.other_end(link.record_id) == Some(link.record_id2))
            {
                return Err(HistoryError::LinkAlreadyExists {
                    record_id: link.record_id,
                    record_id2: link.record_id2,
                }
                .into());
            }

            let created = Link {
                id: Uuid::new_v4(),
                record_id: link.record_id,
                record_id2: link.record_id2,
                strength: link.strength,
            };
            data.insert(created.id, created.clone());
            Ok(created)
        }

        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Link>> {
            Ok(self.data.read().get(&id).cloned())
        }

        async fn find_by_record(&self, record_id: Uuid) -> anyhow::Result<Vec<Link>> {
            let mut links: Vec<Link> = self
                .data
                .read()
                .values()
                .filter(|l| l.other_end(record_id).is_some())
                .cloned()
                .collect();
            links.sort_by(|a, b| b.strength.cmp(&a.strength).then(a.id.cmp(&b.id)));
            Ok(links)
        }

        async fn update_strength(&self, id: Uuid, strength: i16) -> anyhow::Result<Option<Link>> {
            let mut data = self.data.write();
            Ok(data.get_mut(&id).map(|link| {
                link.strength = strength;
                link.clone()
            }))
        }

        async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
            Ok(self.data.write().remove(&id).is_some())
        }
    }

    /// Link store whose backend is always down
    pub struct FailingLinkRepo;

    #[async_trait]
    impl LinkRepository for FailingLinkRepo {
        async fn create(&self, _link: &NewLink) -> anyhow::Result<Link> {
            anyhow::bail!("connection refused")
        }

        async fn find_by_id(&self, _id: Uuid) -> anyhow::Result<Option<Link>> {
            anyhow::bail!("connection refused")
        }

        async fn find_by_record(&self, _record_id: Uuid) -> anyhow::Result<Vec<Link>> {
            anyhow::bail!("connection refused")
        }

        async fn update_strength(&self, _id: Uuid, _strength: i16) -> anyhow::Result<Option<Link>> {
            anyhow::bail!("connection refused")
        }

        async fn delete(&self, _id: Uuid) -> anyhow::Result<bool> {
            anyhow::bail!("connection refused")
        }
    }

    #[derive(Clone, Default)]
    pub struct MockHistoryRepo;

    #[async_trait]
    impl ImpactHistoryRepository for MockHistoryRepo {
        async fn list_for_record(
            &self,
            _record_id: Uuid,
            _limit: u64,
            _offset: u64,
        ) -> anyhow::Result<Vec<ImpactHistoryEntry>> {
            Ok(Vec::new())
        }

        async fn count_for_record(&self, _record_id: Uuid) -> anyhow::Result<u64> {
            Ok(0)
        }
    }
}

fn create_test_service_with_repos() -> (Service, Arc<mocks::MockRecordRepo>, Arc<mocks::MockLinkRepo>) {
    let record_repo = Arc::new(mocks::MockRecordRepo::default());
    let link_repo = Arc::new(mocks::MockLinkRepo::new(record_repo.as_ref().clone()));
    let service = Service::new(
        record_repo.clone(),
        link_repo.clone(),
        Arc::new(mocks::MockHistoryRepo),
        Config::default(),
    );
    (service, record_repo, link_repo)
}

#[tokio::test]
async fn test_create_link() {
    let (service, records, links) = create_test_service_with_repos();
    let a = records.insert_blank();
    let b = records.insert_blank();

    let link = service.create_link(a, b, 7).await.unwrap();

    assert_eq!(link.record_id, a);
    assert_eq!(link.record_id2, b);
    assert_eq!(link.strength, 7);
    assert_eq!(links.count(), 1);
}

#[tokio::test]
async fn test_link_to_itself_is_rejected() {
    let (service, records, links) = create_test_service_with_repos();
    let a = records.insert_blank();

    let err = service.create_link(a, a, 1).await.unwrap_err();

    assert_eq!(err, HistoryError::LinkToItself);
    assert_eq!(links.count(), 0);
}

#[tokio::test]
async fn test_link_to_missing_record_is_not_found() {
    let (service, records, _) = create_test_service_with_repos();
    let a = records.insert_blank();
    let ghost = Uuid::new_v4();

    assert_eq!(
        service.create_link(a, ghost, 1).await.unwrap_err(),
        HistoryError::record_not_found(ghost)
    );
    assert_eq!(
        service.create_link(ghost, a, 1).await.unwrap_err(),
        HistoryError::record_not_found(ghost)
    );
}

#[tokio::test]
async fn test_duplicate_link_in_either_direction_conflicts() {
    let (service, records, links) = create_test_service_with_repos();
    let a = records.insert_blank();
    let b = records.insert_blank();
    service.create_link(a, b, 3).await.unwrap();

    let same = service.create_link(a, b, 4).await.unwrap_err();
    assert_eq!(
        same,
        HistoryError::LinkAlreadyExists {
            record_id: a,
            record_id2: b
        }
    );

    let reverse = service.create_link(b, a, 4).await.unwrap_err();
    assert!(matches!(reverse, HistoryError::LinkAlreadyExists { .. }));
    assert_eq!(links.count(), 1);
}

#[tokio::test]
async fn test_links_by_record_cover_both_sides() {
    let (service, records, _) = create_test_service_with_repos();
    let hub = records.insert_blank();
    let left = records.insert_blank();
    let right = records.insert_blank();
    let unrelated = records.insert_blank();

    service.create_link(hub, right, 2).await.unwrap();
    service.create_link(left, hub, 9).await.unwrap();
    service.create_link(left, unrelated, 1).await.unwrap();

    let links = service.get_links_by_record(hub).await.unwrap();
    let others: Vec<_> = links.iter().filter_map(|l| l.other_end(hub)).collect();
    assert_eq!(others, vec![left, right]);
}

#[tokio::test]
async fn test_links_of_missing_record_is_not_found() {
    let (service, _, _) = create_test_service_with_repos();
    let ghost = Uuid::new_v4();

    assert_eq!(
        service.get_links_by_record(ghost).await.unwrap_err(),
        HistoryError::record_not_found(ghost)
    );
}

#[tokio::test]
async fn test_update_and_delete_link() {
    let (service, records, links) = create_test_service_with_repos();
    let a = records.insert_blank();
    let b = records.insert_blank();
    let link = service.create_link(a, b, 1).await.unwrap();

    let updated = service.update_link(link.id, 10).await.unwrap();
    assert_eq!(updated.strength, 10);
    assert_eq!(service.get_link(link.id).await.unwrap().strength, 10);

    service.delete_link(link.id).await.unwrap();
    assert_eq!(links.count(), 0);
    assert_eq!(
        service.delete_link(link.id).await.unwrap_err(),
        HistoryError::link_not_found(link.id)
    );
    assert_eq!(
        service.update_link(link.id, 2).await.unwrap_err(),
        HistoryError::link_not_found(link.id)
    );
}

#[tokio::test]
async fn test_storage_failure_is_internal() {
    let records = Arc::new(mocks::MockRecordRepo::default());
    let a = records.insert_blank();
    let b = records.insert_blank();
    let service = Service::new(
        records,
        Arc::new(mocks::FailingLinkRepo),
        Arc::new(mocks::MockHistoryRepo),
        Config::default(),
    );

    assert_eq!(
        service.create_link(a, b, 1).await.unwrap_err(),
        HistoryError::Internal
    );
    assert_eq!(
        service.get_link(Uuid::new_v4()).await.unwrap_err(),
        HistoryError::Internal
    );
}
