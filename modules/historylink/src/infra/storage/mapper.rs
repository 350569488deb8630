//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use crate::contract::{
    ChangeKind, Impact, ImpactHistoryEntry, Link, NewImpact, NewLink, Record, RecordFields,
    RecordStatus, RecordType,
};
use super::entity::{impact, impact_history, link, record};
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use uuid::Uuid;

// ===== Record Conversions =====

impl TryFrom<&record::Model> for RecordFields {
    type Error = anyhow::Error;

    fn try_from(model: &record::Model) -> Result<Self, Self::Error> {
        let record_type = RecordType::try_from(model.r#type)
            .map_err(|v| anyhow!("record {} has unknown type {}", model.id, v))?;
        let status = RecordStatus::try_from(model.status)
            .map_err(|v| anyhow!("record {} has unknown status {}", model.id, v))?;

        Ok(Self {
            title: model.title.clone(),
            description: model.description.clone(),
            location: model.location.clone(),
            significance: model.significance.clone(),
            url: model.url.clone(),
            start_date: model.start_date,
            end_date: model.end_date,
            record_type,
            status,
        })
    }
}

/// Assemble a record aggregate from its row and already-loaded impacts
pub fn to_record(model: &record::Model, impacts: Vec<Impact>) -> anyhow::Result<Record> {
    Ok(Record {
        id: model.id,
        fields: RecordFields::try_from(model)?,
        impacts,
    })
}

pub fn record_active_model(id: Uuid, fields: &RecordFields) -> record::ActiveModel {
    record::ActiveModel {
        id: Set(id),
        title: Set(fields.title.clone()),
        description: Set(fields.description.clone()),
        location: Set(fields.location.clone()),
        significance: Set(fields.significance.clone()),
        url: Set(fields.url.clone()),
        start_date: Set(fields.start_date),
        end_date: Set(fields.end_date),
        r#type: Set(fields.record_type.as_i16()),
        status: Set(fields.status.as_i16()),
    }
}

// ===== Impact Conversions =====

impl From<impact::Model> for Impact {
    fn from(model: impact::Model) -> Self {
        Self {
            id: model.id,
            record_id: model.record_id,
            description: model.description,
            value: model.value,
            category: model.category,
        }
    }
}

impl From<&Impact> for impact::ActiveModel {
    fn from(impact: &Impact) -> Self {
        Self {
            id: Set(impact.id),
            record_id: Set(impact.record_id),
            description: Set(impact.description.clone()),
            value: Set(impact.value),
            category: Set(impact.category),
        }
    }
}

pub fn new_impact_active_model(record_id: Uuid, impact: &NewImpact) -> impact::ActiveModel {
    impact::ActiveModel {
        id: Set(Uuid::new_v4()),
        record_id: Set(record_id),
        description: Set(impact.description.clone()),
        value: Set(impact.value),
        category: Set(impact.category),
    }
}

// ===== Link Conversions =====

/// Order-independent key of a record pair
pub fn link_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Insert model for a new link, keyed by its unordered record pair
pub fn link_active_model(link: &NewLink) -> link::ActiveModel {
    let (pair_low, pair_high) = link_pair(link.record_id, link.record_id2);

    link::ActiveModel {
        id: Set(Uuid::new_v4()),
        record_id: Set(link.record_id),
        record_id2: Set(link.record_id2),
        strength: Set(link.strength),
        pair_low: Set(pair_low),
        pair_high: Set(pair_high),
    }
}

impl From<link::Model> for Link {
    fn from(model: link::Model) -> Self {
        Self {
            id: model.id,
            record_id: model.record_id,
            record_id2: model.record_id2,
            strength: model.strength,
        }
    }
}

// ===== Impact History Conversions =====

impl TryFrom<impact_history::Model> for ImpactHistoryEntry {
    type Error = anyhow::Error;

    fn try_from(model: impact_history::Model) -> Result<Self, Self::Error> {
        let change = ChangeKind::parse(&model.change)
            .ok_or_else(|| anyhow!("history entry {} has unknown change '{}'", model.id, model.change))?;

        Ok(Self {
            id: model.id,
            impact_id: model.impact_id,
            record_id: model.record_id,
            description: model.description,
            value: model.value,
            category: model.category,
            change,
            changed_at: model.changed_at,
        })
    }
}

pub fn history_active_model(
    impact: &Impact,
    change: ChangeKind,
    at: DateTime<Utc>,
) -> impact_history::ActiveModel {
    impact_history::ActiveModel {
        seq: NotSet,
        id: Set(Uuid::new_v4()),
        impact_id: Set(Some(impact.id)),
        record_id: Set(Some(impact.record_id)),
        description: Set(impact.description.clone()),
        value: Set(impact.value),
        category: Set(impact.category),
        change: Set(change.as_str().to_string()),
        changed_at: Set(at),
    }
}
