//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::{FieldViolation, HistoryError};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Media type of Problem Details responses
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Per-field validation failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ProblemItem>,
}

/// One rejected field inside a Problem
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProblemItem {
    pub name: String,
    pub reason: String,
}

impl From<FieldViolation> for ProblemItem {
    fn from(v: FieldViolation) -> Self {
        Self {
            name: v.name,
            reason: v.reason,
        }
    }
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            errors: Vec::new(),
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_errors(mut self, errors: impl IntoIterator<Item = ProblemItem>) -> Self {
        self.errors.extend(errors);
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: HistoryError) -> Problem {
    match error {
        HistoryError::NotFound { resource, id } => Problem::new(
            StatusCode::NOT_FOUND,
            format!("{} Not Found", capitalize(resource)),
        )
        .with_detail(format!("{} with id '{}' was not found", resource, id)),

        HistoryError::Validation { violations } => {
            let detail = match violations.as_slice() {
                [only] => only.reason.clone(),
                _ => format!("{} fields failed validation", violations.len()),
            };
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error")
                .with_detail(detail)
                .with_errors(violations.into_iter().map(ProblemItem::from))
        }

        HistoryError::LinkToItself => Problem::new(StatusCode::BAD_REQUEST, "Invalid Link")
            .with_detail("A record cannot be linked to itself"),

        HistoryError::LinkAlreadyExists {
            record_id,
            record_id2,
        } => Problem::new(StatusCode::CONFLICT, "Link Already Exists").with_detail(format!(
            "Records '{}' and '{}' are already linked",
            record_id, record_id2
        )),

        HistoryError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .with_detail("An unexpected error occurred"),
    }
}
