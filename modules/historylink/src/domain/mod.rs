//! Domain layer - business logic and services

pub mod paging;
pub mod reconcile;
pub mod repository;
pub mod service;
pub mod validation;

pub use paging::PageWindow;
pub use reconcile::{plan_impacts, ImpactPlan};
pub use repository::{ImpactHistoryRepository, LinkRepository, RecordRepository};
pub use service::Service;
