//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod catalog_loader;
pub mod catalog_service;

pub use catalog_service::{CatalogEntry, CatalogService, CatalogView};
