//! Mapper implementations for converting between DTOs and contract models
//!
//! Requests are parsed here (dates, enum discriminants); field rules such as
//! lengths and required values are checked by the domain service.

use super::dto::*;
use crate::contract::{
    self, FieldViolation, HistoryError, ImpactInput, NewImpact, NewRecord, RecordFields,
    RecordStatus, RecordType, RecordUpdate,
};
use chrono::NaiveDateTime;
use uuid::Uuid;

/// Wire format of record dates: minute precision, no separators
pub const DATE_FORMAT: &str = "%Y%m%d%H%M";

/// Length of a `YYYYMMDDhhmm` date
const DATE_LEN: usize = 12;

pub fn format_date(date: Option<NaiveDateTime>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_date(
    name: &str,
    value: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<NaiveDateTime> {
    let value = value.trim();
    // chrono accepts single-digit fields, the wire format does not
    let parsed = if value.len() == DATE_LEN && value.bytes().all(|b| b.is_ascii_digit()) {
        NaiveDateTime::parse_from_str(value, DATE_FORMAT).ok()
    } else {
        None
    };

    if parsed.is_none() {
        violations.push(FieldViolation::new(
            name,
            format!("{name} must use the YYYYMMDDhhmm format"),
        ));
    }
    parsed
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// A command built from a request, with the fields that failed to parse.
///
/// Unparseable dates are left empty and unknown discriminants fall back to
/// a placeholder, so the rest of the command can still be checked.
#[derive(Debug)]
pub struct Parsed<T> {
    pub command: T,
    pub violations: Vec<FieldViolation>,
}

impl<T> Parsed<T> {
    /// The command when every field parsed. Otherwise fails with the parse
    /// violations followed by those `check` reports for the other fields.
    pub fn into_command(
        self,
        check: impl FnOnce(&T) -> Result<(), HistoryError>,
    ) -> Result<T, HistoryError> {
        if self.violations.is_empty() {
            return Ok(self.command);
        }

        let mut violations = self.violations;
        if let Err(HistoryError::Validation { violations: more }) = check(&self.command) {
            for violation in more {
                if !violations.iter().any(|v| v.name == violation.name) {
                    violations.push(violation);
                }
            }
        }
        Err(HistoryError::Validation { violations })
    }
}

/// Raw scalar fields common to create and update requests
struct RawFields {
    title: String,
    description: String,
    location: String,
    significance: String,
    url: String,
    start_date: String,
    end_date: String,
    record_status: i16,
    record_type: i16,
}

fn parse_fields(raw: RawFields, violations: &mut Vec<FieldViolation>) -> RecordFields {
    let start_date = parse_date("startDate", &raw.start_date, violations);
    let end_date = parse_date("endDate", &raw.end_date, violations);

    let record_type = RecordType::try_from(raw.record_type).unwrap_or_else(|v| {
        violations.push(FieldViolation::new(
            "type",
            format!("type must be one of 0, 1, 2, 3 (got {v})"),
        ));
        RecordType::Event
    });
    let status = RecordStatus::try_from(raw.record_status).unwrap_or_else(|v| {
        violations.push(FieldViolation::new(
            "recordStatus",
            format!("recordStatus must be one of 0, 1, 2, 3 (got {v})"),
        ));
        RecordStatus::Draft
    });

    RecordFields {
        title: raw.title,
        description: raw.description,
        location: non_empty(raw.location),
        significance: non_empty(raw.significance),
        url: raw.url,
        start_date,
        end_date,
        record_type,
        status,
    }
}

// ===== Request conversions =====

pub fn parse_new_record(req: CreateRecordRequest) -> Parsed<NewRecord> {
    let mut violations = Vec::new();
    let fields = parse_fields(
        RawFields {
            title: req.title,
            description: req.description,
            location: req.location,
            significance: req.significance,
            url: req.url,
            start_date: req.start_date,
            end_date: req.end_date,
            record_status: req.record_status,
            record_type: req.r#type,
        },
        &mut violations,
    );

    let command = NewRecord {
        fields,
        impacts: req
            .impacts
            .into_iter()
            .map(|i| NewImpact {
                description: i.description,
                value: i.value,
                category: i.category,
            })
            .collect(),
    };
    Parsed {
        command,
        violations,
    }
}

/// Build an update command for record `id`
pub fn parse_record_update(id: Uuid, req: UpdateRecordRequest) -> Parsed<RecordUpdate> {
    let mut violations = Vec::new();
    let fields = parse_fields(
        RawFields {
            title: req.title,
            description: req.description,
            location: req.location,
            significance: req.significance,
            url: req.url,
            start_date: req.start_date,
            end_date: req.end_date,
            record_status: req.record_status,
            record_type: req.r#type,
        },
        &mut violations,
    );

    let command = RecordUpdate {
        id,
        fields,
        impacts: req
            .impacts
            .into_iter()
            .map(|i| ImpactInput {
                id: i.id,
                description: i.description,
                value: i.value,
                category: i.category,
            })
            .collect(),
    };
    Parsed {
        command,
        violations,
    }
}

// ===== Response conversions =====

impl From<contract::Record> for RecordDto {
    fn from(record: contract::Record) -> Self {
        let fields = record.fields;
        Self {
            id: record.id,
            title: fields.title,
            description: fields.description,
            location: fields.location.unwrap_or_default(),
            significance: fields.significance.unwrap_or_default(),
            url: fields.url,
            start_date: format_date(fields.start_date),
            end_date: format_date(fields.end_date),
            record_status: fields.status.as_i16(),
            r#type: fields.record_type.as_i16(),
            impacts: record.impacts.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::Impact> for ImpactDto {
    fn from(impact: contract::Impact) -> Self {
        Self {
            id: impact.id,
            record_id: impact.record_id,
            description: impact.description,
            value: impact.value,
            category: impact.category,
        }
    }
}

impl From<contract::Page<contract::Record>> for RecordsPageResponse {
    fn from(page: contract::Page<contract::Record>) -> Self {
        Self {
            page: page.page,
            size: page.size,
            total: page.total,
            records: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Present a link from the point of view of `source`.
///
/// Falls back to the stored direction when `source` is not an endpoint.
pub fn to_link_dto(link: contract::Link, source: Uuid) -> LinkDto {
    match link.other_end(source) {
        Some(other) => LinkDto {
            id: link.id,
            source_record_id: source,
            record_id: other,
            strength: link.strength,
        },
        None => link.into(),
    }
}

impl From<contract::Link> for LinkDto {
    fn from(link: contract::Link) -> Self {
        Self {
            id: link.id,
            source_record_id: link.record_id,
            record_id: link.record_id2,
            strength: link.strength,
        }
    }
}

impl From<contract::ImpactHistoryEntry> for ImpactHistoryDto {
    fn from(entry: contract::ImpactHistoryEntry) -> Self {
        Self {
            id: entry.id,
            impact_id: entry.impact_id,
            record_id: entry.record_id,
            description: entry.description,
            value: entry.value,
            category: entry.category,
            change: entry.change.as_str().to_string(),
            changed_at: entry.changed_at,
        }
    }
}

impl From<contract::Page<contract::ImpactHistoryEntry>> for ImpactHistoryPageResponse {
    fn from(page: contract::Page<contract::ImpactHistoryEntry>) -> Self {
        Self {
            page: page.page,
            size: page.size,
            total: page.total,
            entries: page.items.into_iter().map(Into::into).collect(),
        }
    }
}
