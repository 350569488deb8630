//! Historylink Module
//!
//! Historical records (arcs, events, people, objects) with weighted impacts,
//! undirected links between records and an append-only log of impact changes,
//! served over a REST API.

// Public exports
pub mod contract;
pub use contract::{
    error::HistoryError, ChangeKind, Impact, ImpactHistoryEntry, Link, NewRecord, Page, Record,
    RecordFields, RecordStatus, RecordType, RecordUpdate,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::HistorylinkModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
