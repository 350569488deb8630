//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Record DTOs =====

/// Record response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordDto {
    pub id: Uuid,

    #[schema(example = "Fall of Constantinople")]
    pub title: String,

    pub description: String,

    /// Empty when unknown
    pub location: String,

    /// Empty when unknown
    pub significance: String,

    pub url: String,

    /// `YYYYMMDDhhmm`
    #[schema(example = "145305290000")]
    pub start_date: String,

    /// `YYYYMMDDhhmm`
    #[schema(example = "145305291200")]
    pub end_date: String,

    /// 0=Removed 1=Draft 2=PendingReview 3=Reviewed
    pub record_status: i16,

    /// 0=Arc 1=Event 2=Person 3=Object
    pub r#type: i16,

    pub impacts: Vec<ImpactDto>,
}

/// Impact response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImpactDto {
    pub id: Uuid,
    pub record_id: Uuid,
    pub description: String,
    pub value: i16,
    pub category: i16,
}

/// Record creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    pub title: String,

    pub description: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub significance: String,

    pub url: String,

    /// `YYYYMMDDhhmm`
    pub start_date: String,

    /// `YYYYMMDDhhmm`
    pub end_date: String,

    pub record_status: i16,

    pub r#type: i16,

    pub impacts: Vec<CreateImpactRequest>,
}

/// Impact payload on record creation
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateImpactRequest {
    #[serde(default)]
    pub description: String,
    pub value: i16,
    pub category: i16,
}

/// Record update request; the impact list replaces the stored one
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub significance: String,

    pub url: String,

    pub start_date: String,

    pub end_date: String,

    pub record_status: i16,

    pub r#type: i16,

    pub impacts: Vec<UpdateImpactRequest>,
}

/// Impact payload on record update
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImpactRequest {
    /// Omit (or send the nil UUID) to add a new impact
    #[serde(default)]
    pub id: Option<Uuid>,

    #[serde(default)]
    pub description: String,

    pub value: i16,

    pub category: i16,
}

/// Paginated list of records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordsPageResponse {
    pub page: u64,

    pub size: u64,

    /// Number of records in the store
    pub total: u64,

    pub records: Vec<RecordDto>,
}

// ===== Link DTOs =====

/// Link response DTO, seen from `source_record_id`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkDto {
    pub id: Uuid,

    pub source_record_id: Uuid,

    /// The linked record
    pub record_id: Uuid,

    pub strength: i16,
}

/// Link creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub record_id: Uuid,

    #[serde(default)]
    pub strength: i16,
}

/// Link update request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateLinkRequest {
    pub strength: i16,
}

// ===== History DTOs =====

/// Impact history entry DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImpactHistoryDto {
    pub id: Uuid,
    pub impact_id: Option<Uuid>,
    pub record_id: Option<Uuid>,
    pub description: String,
    pub value: i16,
    pub category: i16,

    #[schema(example = "updated")]
    pub change: String,

    pub changed_at: chrono::DateTime<chrono::Utc>,
}

/// Paginated impact history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImpactHistoryPageResponse {
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub entries: Vec<ImpactHistoryDto>,
}

// Note: Conversion implementations live in mapper.rs
