//! Input validation for records and impacts

use crate::contract::{
    FieldViolation, HistoryError, ImpactInput, NewRecord, RecordFields, RecordUpdate,
};
use std::collections::HashSet;

/// Whether title and description must be present.
///
/// Creation requires them, updates may clear them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextPolicy {
    Required,
    Optional,
}

/// Validate a record creation command
pub fn validate_new_record(record: &NewRecord, max_len: usize) -> Result<(), HistoryError> {
    let mut violations = Vec::new();
    check_fields(&record.fields, TextPolicy::Required, max_len, &mut violations);

    for (idx, impact) in record.impacts.iter().enumerate() {
        check_length(
            &format!("impacts[{idx}].description"),
            &impact.description,
            max_len,
            &mut violations,
        );
    }

    finish(violations)
}

/// Validate a record update command
pub fn validate_record_update(update: &RecordUpdate, max_len: usize) -> Result<(), HistoryError> {
    let mut violations = Vec::new();
    check_fields(&update.fields, TextPolicy::Optional, max_len, &mut violations);
    check_impact_inputs(&update.impacts, max_len, &mut violations);
    finish(violations)
}

fn check_fields(
    fields: &RecordFields,
    policy: TextPolicy,
    max_len: usize,
    violations: &mut Vec<FieldViolation>,
) {
    if policy == TextPolicy::Required {
        check_required("title", &fields.title, violations);
        check_required("description", &fields.description, violations);
    }
    check_required("url", &fields.url, violations);

    check_length("title", &fields.title, max_len, violations);
    check_length("description", &fields.description, max_len, violations);
    check_length("url", &fields.url, max_len, violations);
    if let Some(location) = &fields.location {
        check_length("location", location, max_len, violations);
    }
    if let Some(significance) = &fields.significance {
        check_length("significance", significance, max_len, violations);
    }

    match (fields.start_date, fields.end_date) {
        (Some(start), Some(end)) if end < start => {
            violations.push(FieldViolation::new(
                "endDate",
                "endDate must not be before startDate",
            ));
        }
        (start, end) => {
            if start.is_none() {
                violations.push(FieldViolation::new("startDate", "startDate is required"));
            }
            if end.is_none() {
                violations.push(FieldViolation::new("endDate", "endDate is required"));
            }
        }
    }
}

fn check_impact_inputs(
    impacts: &[ImpactInput],
    max_len: usize,
    violations: &mut Vec<FieldViolation>,
) {
    let mut seen = HashSet::new();
    for (idx, impact) in impacts.iter().enumerate() {
        check_length(
            &format!("impacts[{idx}].description"),
            &impact.description,
            max_len,
            violations,
        );
        if let Some(id) = impact.id.filter(|id| !id.is_nil()) {
            if !seen.insert(id) {
                violations.push(FieldViolation::new(
                    format!("impacts[{idx}].id"),
                    format!("impact {id} appears more than once"),
                ));
            }
        }
    }
}

fn check_required(name: &str, value: &str, violations: &mut Vec<FieldViolation>) {
    if value.trim().is_empty() {
        violations.push(FieldViolation::new(name, format!("{name} is required")));
    }
}

fn check_length(name: &str, value: &str, max_len: usize, violations: &mut Vec<FieldViolation>) {
    if value.chars().count() > max_len {
        violations.push(FieldViolation::new(
            name,
            format!("{name} must be at most {max_len} characters"),
        ));
    }
}

fn finish(violations: Vec<FieldViolation>) -> Result<(), HistoryError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(HistoryError::Validation { violations })
    }
}
