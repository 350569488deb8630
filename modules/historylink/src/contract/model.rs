//! Contract models for historylink
//!
//! These models are transport-agnostic and shared by the REST layer,
//! the domain service and the storage layer.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

/// Kind of historical record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Arc,
    Event,
    Person,
    Object,
}

impl RecordType {
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Arc => 0,
            Self::Event => 1,
            Self::Person => 2,
            Self::Object => 3,
        }
    }
}

impl TryFrom<i16> for RecordType {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Arc),
            1 => Ok(Self::Event),
            2 => Ok(Self::Person),
            3 => Ok(Self::Object),
            other => Err(other),
        }
    }
}

/// Editorial status of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Removed,
    Draft,
    PendingReview,
    Reviewed,
}

impl RecordStatus {
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Removed => 0,
            Self::Draft => 1,
            Self::PendingReview => 2,
            Self::Reviewed => 3,
        }
    }
}

impl TryFrom<i16> for RecordStatus {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Removed),
            1 => Ok(Self::Draft),
            2 => Ok(Self::PendingReview),
            3 => Ok(Self::Reviewed),
            other => Err(other),
        }
    }
}

/// Scalar fields of a record, shared by create, update and read paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub title: String,
    pub description: String,
    /// `None` when no location is known
    pub location: Option<String>,
    pub significance: Option<String>,
    pub url: String,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub record_type: RecordType,
    pub status: RecordStatus,
}

/// A stored record together with its impacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: Uuid,
    pub fields: RecordFields,
    pub impacts: Vec<Impact>,
}

/// A weighted, categorized effect of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Impact {
    pub id: Uuid,
    pub record_id: Uuid,
    pub description: String,
    pub value: i16,
    pub category: i16,
}

/// Impact payload for a record that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImpact {
    pub description: String,
    pub value: i16,
    pub category: i16,
}

/// Record creation command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub fields: RecordFields,
    pub impacts: Vec<NewImpact>,
}

/// Incoming impact on update.
///
/// `id == None` asks for a new impact; otherwise it must name an impact
/// already owned by the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactInput {
    pub id: Option<Uuid>,
    pub description: String,
    pub value: i16,
    pub category: i16,
}

/// Full replacement of a record and its impact list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdate {
    pub id: Uuid,
    pub fields: RecordFields,
    pub impacts: Vec<ImpactInput>,
}

/// Link between two records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Uuid,
    pub record_id: Uuid,
    pub record_id2: Uuid,
    pub strength: i16,
}

impl Link {
    /// The endpoint opposite to `record_id`, if the link touches it
    pub fn other_end(&self, record_id: Uuid) -> Option<Uuid> {
        if self.record_id == record_id {
            Some(self.record_id2)
        } else if self.record_id2 == record_id {
            Some(self.record_id)
        } else {
            None
        }
    }
}

/// Link creation command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub record_id: Uuid,
    pub record_id2: Uuid,
    pub strength: i16,
}

/// What happened to an impact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// Snapshot of an impact taken when it changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactHistoryEntry {
    pub id: Uuid,
    pub impact_id: Option<Uuid>,
    pub record_id: Option<Uuid>,
    pub description: String,
    pub value: i16,
    pub category: i16,
    pub change: ChangeKind,
    pub changed_at: DateTime<Utc>,
}

/// One page of results plus the size of the whole collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub items: Vec<T>,
}
