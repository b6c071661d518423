//! Domain entities
//!
//! Pure domain models for the feed catalog.

pub mod feed;
pub mod theme;

pub use feed::{
    CatalogOrigin, FeedDescriptor, FeedEnrichment, FeedRecord, ProbeOutcome, ProbeResponse,
    RefreshId, RefreshSummary,
};
pub use theme::Theme;
