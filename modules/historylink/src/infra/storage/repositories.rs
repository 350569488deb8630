//! SeaORM repository implementations

use crate::contract::{
    ChangeKind, HistoryError, Impact, ImpactHistoryEntry, Link, NewLink, NewRecord, Record,
    RecordFields, RecordUpdate,
};
use crate::domain::reconcile::plan_impacts;
use crate::domain::repository::{ImpactHistoryRepository, LinkRepository, RecordRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    SqlErr, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{impact, impact_history, link, record};
use super::mapper;

// ===== Shared helpers =====

/// Load impacts for the given records, grouped by record id
async fn load_impacts<C: ConnectionTrait>(
    conn: &C,
    record_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Impact>>> {
    let mut grouped: HashMap<Uuid, Vec<Impact>> = HashMap::new();
    if record_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = impact::Entity::find()
        .filter(impact::Column::RecordId.is_in(record_ids.iter().copied()))
        .order_by_asc(impact::Column::Category)
        .order_by_asc(impact::Column::Description)
        .order_by_asc(impact::Column::Id)
        .all(conn)
        .await?;

    for row in rows {
        grouped.entry(row.record_id).or_default().push(row.into());
    }
    Ok(grouped)
}

async fn load_record_impacts<C: ConnectionTrait>(conn: &C, record_id: Uuid) -> Result<Vec<Impact>> {
    Ok(load_impacts(conn, &[record_id])
        .await?
        .remove(&record_id)
        .unwrap_or_default())
}

/// Append a history snapshot of `impact`
async fn append_history<C: ConnectionTrait>(
    conn: &C,
    impact: &Impact,
    change: ChangeKind,
    at: DateTime<Utc>,
) -> Result<()> {
    impact_history::Entity::insert(mapper::history_active_model(impact, change, at))
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Link between two records in either direction
async fn find_pair<C: ConnectionTrait>(
    conn: &C,
    record_id: Uuid,
    record_id2: Uuid,
) -> Result<Option<Link>> {
    let (low, high) = mapper::link_pair(record_id, record_id2);
    let result = link::Entity::find()
        .filter(link::Column::PairLow.eq(low))
        .filter(link::Column::PairHigh.eq(high))
        .one(conn)
        .await?;

    Ok(result.map(Into::into))
}

// ===== Record Repository =====

pub struct SeaOrmRecordRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmRecordRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordRepository for SeaOrmRecordRepository {
    async fn create(&self, record: &NewRecord) -> Result<Record> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let model = mapper::record_active_model(Uuid::new_v4(), &record.fields)
            .insert(&txn)
            .await?;

        let mut impacts = Vec::with_capacity(record.impacts.len());
        for new_impact in &record.impacts {
            let impact: Impact = mapper::new_impact_active_model(model.id, new_impact)
                .insert(&txn)
                .await?
                .into();
            append_history(&txn, &impact, ChangeKind::Created, now).await?;
            impacts.push(impact);
        }

        txn.commit().await?;
        mapper::to_record(&model, impacts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Record>> {
        let Some(model) = record::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let impacts = load_record_impacts(&*self.db, id).await?;
        Ok(Some(mapper::to_record(&model, impacts)?))
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let count = record::Entity::find_by_id(id).count(&*self.db).await?;

        Ok(count > 0)
    }

    async fn update(&self, update: &RecordUpdate) -> Result<Option<Record>> {
        let txn = self.db.begin().await?;

        let Some(current) = record::Entity::find_by_id(update.id).one(&txn).await? else {
            return Ok(None);
        };

        let existing = load_record_impacts(&txn, update.id).await?;
        let plan = plan_impacts(update.id, &existing, &update.impacts)?;
        let now = Utc::now();

        for removed in &plan.deletes {
            impact::Entity::delete_by_id(removed.id).exec(&txn).await?;
            append_history(&txn, removed, ChangeKind::Deleted, now).await?;
        }

        for changed in &plan.updates {
            let active: impact::ActiveModel = changed.into();
            active.update(&txn).await?;
            append_history(&txn, changed, ChangeKind::Updated, now).await?;
        }

        for new_impact in &plan.inserts {
            let inserted: Impact = mapper::new_impact_active_model(update.id, new_impact)
                .insert(&txn)
                .await?
                .into();
            append_history(&txn, &inserted, ChangeKind::Created, now).await?;
        }

        // Skip the row write when no scalar field changed
        let model = if RecordFields::try_from(&current)? == update.fields {
            current
        } else {
            mapper::record_active_model(update.id, &update.fields)
                .update(&txn)
                .await?
        };

        let impacts = load_record_impacts(&txn, update.id).await?;
        txn.commit().await?;

        tracing::debug!(
            record_id = %update.id,
            inserted = plan.inserts.len(),
            updated = plan.updates.len(),
            deleted = plan.deletes.len(),
            "impacts reconciled"
        );
        Ok(Some(mapper::to_record(&model, impacts)?))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let txn = self.db.begin().await?;

        if record::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(false);
        }

        let now = Utc::now();
        for removed in load_record_impacts(&txn, id).await? {
            append_history(&txn, &removed, ChangeKind::Deleted, now).await?;
        }

        impact::Entity::delete_many()
            .filter(impact::Column::RecordId.eq(id))
            .exec(&txn)
            .await?;

        link::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(link::Column::RecordId.eq(id))
                    .add(link::Column::RecordId2.eq(id)),
            )
            .exec(&txn)
            .await?;

        record::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }

    async fn list_page(&self, limit: u64, offset: u64) -> Result<Vec<Record>> {
        let models = record::Entity::find()
            .order_by_asc(record::Column::StartDate)
            .order_by_asc(record::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut impacts = load_impacts(&*self.db, &ids).await?;

        models
            .iter()
            .map(|m| mapper::to_record(m, impacts.remove(&m.id).unwrap_or_default()))
            .collect()
    }

    async fn count(&self) -> Result<u64> {
        Ok(record::Entity::find().count(&*self.db).await?)
    }
}

// ===== Link Repository =====

pub struct SeaOrmLinkRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmLinkRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LinkRepository for SeaOrmLinkRepository {
    async fn create(&self, new_link: &NewLink) -> Result<Link> {
        let txn = self.db.begin().await?;

        for id in [new_link.record_id, new_link.record_id2] {
            if record::Entity::find_by_id(id).count(&txn).await? == 0 {
                return Err(HistoryError::record_not_found(id).into());
            }
        }

        let already_linked = HistoryError::LinkAlreadyExists {
            record_id: new_link.record_id,
            record_id2: new_link.record_id2,
        };
        if find_pair(&txn, new_link.record_id, new_link.record_id2)
            .await?
            .is_some()
        {
            return Err(already_linked.into());
        }

        // A concurrent create of the same pair loses on the unique pair index
        let model = match mapper::link_active_model(new_link).insert(&txn).await {
            Ok(model) => model,
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(already_linked.into());
            }
            Err(err) => return Err(err.into()),
        };

        txn.commit().await?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Link>> {
        let result = link::Entity::find_by_id(id).one(&*self.db).await?;

        Ok(result.map(Into::into))
    }

    async fn find_by_record(&self, record_id: Uuid) -> Result<Vec<Link>> {
        let results = link::Entity::find()
            .filter(
                Condition::any()
                    .add(link::Column::RecordId.eq(record_id))
                    .add(link::Column::RecordId2.eq(record_id)),
            )
            .order_by_desc(link::Column::Strength)
            .order_by_asc(link::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_strength(&self, id: Uuid, strength: i16) -> Result<Option<Link>> {
        let Some(model) = link::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        if model.strength == strength {
            return Ok(Some(model.into()));
        }

        let mut active: link::ActiveModel = model.into();
        active.strength = Set(strength);
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = link::Entity::delete_by_id(id).exec(&*self.db).await?;

        Ok(result.rows_affected > 0)
    }
}

// ===== Impact History Repository =====

pub struct SeaOrmImpactHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmImpactHistoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ImpactHistoryRepository for SeaOrmImpactHistoryRepository {
    async fn list_for_record(
        &self,
        record_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ImpactHistoryEntry>> {
        let results = impact_history::Entity::find()
            .filter(impact_history::Column::RecordId.eq(record_id))
            .order_by_desc(impact_history::Column::ChangedAt)
            .order_by_desc(impact_history::Column::Seq)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(ImpactHistoryEntry::try_from)
            .collect::<Result<Vec<_>>>()
    }

    async fn count_for_record(&self, record_id: Uuid) -> Result<u64> {
        let count = impact_history::Entity::find()
            .filter(impact_history::Column::RecordId.eq(record_id))
            .count(&*self.db)
            .await?;

        Ok(count)
    }
}
