//! Schema and repository tests against in-memory SQLite

mod common;

use common::*;
use historylink::contract::{HistoryError, NewLink};
use historylink::domain::repository::LinkRepository;
use historylink::infra::storage::entity::link;
use historylink::infra::storage::{Migrator, SeaOrmLinkRepository};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, SqlErr};
use sea_orm_migration::MigratorTrait;
use std::collections::HashSet;
use uuid::Uuid;

fn link_error(result: anyhow::Result<historylink::contract::Link>) -> HistoryError {
    match result {
        Ok(link) => panic!("Expected link create to fail, got {link:?}"),
        Err(err) => HistoryError::from_repository(err),
    }
}

#[tokio::test]
async fn migrations_have_distinct_names_and_rerun_cleanly() {
    let db = setup_db().await;

    if let Err(err) = Migrator::up(&*db, None).await {
        panic!("second migration run failed: {err}");
    }

    let applied = match Migrator::get_applied_migrations(&*db).await {
        Ok(applied) => applied,
        Err(err) => panic!("failed to read applied migrations: {err}"),
    };
    let names: HashSet<String> = applied.iter().map(|m| m.name().to_string()).collect();
    assert_eq!(applied.len(), 4);
    assert_eq!(names.len(), 4);
    assert!(names.contains("m20250301_000001_create_record"));
    assert!(names.contains("m20250301_000004_create_impact_history"));
}

#[tokio::test]
async fn reversed_pair_is_rejected_by_repository() {
    let db = setup_db().await;
    let service = build_service(db.clone(), Default::default());
    let a = create(&service, new_record("Cause", "191406280000", &[])).await.id;
    let b = create(&service, new_record("Effect", "191407280000", &[])).await.id;
    let repo = SeaOrmLinkRepository::new(db);

    let first = repo
        .create(&NewLink {
            record_id: a,
            record_id2: b,
            strength: 3,
        })
        .await;
    assert!(first.is_ok());

    let reversed = repo
        .create(&NewLink {
            record_id: b,
            record_id2: a,
            strength: 3,
        })
        .await;
    assert_eq!(
        link_error(reversed),
        HistoryError::LinkAlreadyExists {
            record_id: b,
            record_id2: a
        }
    );
    assert_eq!(service.get_links_by_record(a).await.unwrap().len(), 1);
}

#[tokio::test]
async fn link_to_missing_record_is_not_found_in_repository() {
    let db = setup_db().await;
    let service = build_service(db.clone(), Default::default());
    let a = create(&service, new_record("Alone", "190001010000", &[])).await.id;
    let ghost = Uuid::new_v4();
    let repo = SeaOrmLinkRepository::new(db);

    let result = repo
        .create(&NewLink {
            record_id: ghost,
            record_id2: a,
            strength: 1,
        })
        .await;
    assert_eq!(link_error(result), HistoryError::record_not_found(ghost));
}

#[tokio::test]
async fn pair_index_rejects_reversed_row() {
    let db = setup_db().await;
    let service = build_service(db.clone(), Default::default());
    let a = create(&service, new_record("Left", "190001010000", &[])).await.id;
    let b = create(&service, new_record("Right", "190001010000", &[])).await.id;
    let (low, high) = if a <= b { (a, b) } else { (b, a) };

    let row = |record_id: Uuid, record_id2: Uuid| link::ActiveModel {
        id: Set(Uuid::new_v4()),
        record_id: Set(record_id),
        record_id2: Set(record_id2),
        strength: Set(1),
        pair_low: Set(low),
        pair_high: Set(high),
    };

    if let Err(err) = row(a, b).insert(&*db).await {
        panic!("first link row failed: {err}");
    }
    let err = match row(b, a).insert(&*db).await {
        Ok(model) => panic!("reversed row was stored: {model:?}"),
        Err(err) => err,
    };
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    let stored = link::Entity::find().all(&*db).await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn concurrent_links_in_both_directions_keep_one() {
    let service = setup_service().await;
    let a = create(&service, new_record("Spark", "191406280000", &[])).await.id;
    let b = create(&service, new_record("War", "191407280000", &[])).await.id;

    let (forward, backward) = tokio::join!(
        service.create_link(a, b, 1),
        service.create_link(b, a, 1)
    );

    let outcomes = [forward, backward];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(HistoryError::LinkAlreadyExists { .. }))));
    assert_eq!(service.get_links_by_record(a).await.unwrap().len(), 1);
}
