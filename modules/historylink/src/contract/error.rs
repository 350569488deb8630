//! Contract error types for historylink
//!
//! These errors are transport-agnostic; the REST layer maps them to
//! Problem Details.

use std::fmt;
use uuid::Uuid;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name as seen by the client (e.g. `startDate`, `impacts[1].description`)
    pub name: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// Historylink domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// Record, impact or link not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (record, impact, link)
        resource: &'static str,
        id: Uuid,
    },

    /// One or more input fields were rejected
    #[error("validation failed: {}", join_violations(.violations))]
    Validation { violations: Vec<FieldViolation> },

    #[error("cannot link record to itself")]
    LinkToItself,

    /// A link between the two records already exists (in either direction)
    #[error("link already exists between {record_id} and {record_id2}")]
    LinkAlreadyExists { record_id: Uuid, record_id2: Uuid },

    #[error("internal error")]
    Internal,
}

impl HistoryError {
    pub fn record_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: "record",
            id,
        }
    }

    pub fn impact_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: "impact",
            id,
        }
    }

    pub fn link_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: "link",
            id,
        }
    }

    /// Recover a domain error raised inside a repository, or collapse
    /// anything else into `Internal`.
    pub fn from_repository(error: anyhow::Error) -> Self {
        match error.downcast::<HistoryError>() {
            Ok(domain) => domain,
            Err(other) => {
                tracing::error!(error = ?other, "repository failure");
                Self::Internal
            }
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_repository_keeps_domain_errors() {
        let id = Uuid::new_v4();
        let wrapped = anyhow::Error::new(HistoryError::impact_not_found(id))
            .context("failed to reconcile impacts");

        assert_eq!(
            HistoryError::from_repository(wrapped),
            HistoryError::impact_not_found(id)
        );
    }

    #[test]
    fn test_from_repository_collapses_foreign_errors() {
        let err = anyhow::anyhow!("connection reset");
        assert_eq!(HistoryError::from_repository(err), HistoryError::Internal);
    }

    #[test]
    fn test_validation_display_lists_fields() {
        let err = HistoryError::Validation {
            violations: vec![
                FieldViolation::new("title", "must not be empty"),
                FieldViolation::new("url", "must not be empty"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "validation failed: title: must not be empty, url: must not be empty"
        );
    }
}
