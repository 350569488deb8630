//! Contract layer - transport-agnostic models and errors
//!
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::{FieldViolation, HistoryError};
pub use model::{
    ChangeKind, Impact, ImpactHistoryEntry, ImpactInput, Link, NewImpact, NewLink, NewRecord,
    Page, Record, RecordFields, RecordStatus, RecordType, RecordUpdate,
};
