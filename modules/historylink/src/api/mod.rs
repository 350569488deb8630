//! API layer - REST adapters over the domain service

pub mod rest;
