//! Upstream feed ports
//!
//! Interfaces for reaching the remote catalog config and the feeds it lists.

use async_trait::async_trait;

use crate::domain::entities::ProbeResponse;
use crate::error::FetchError;

/// Source of the raw catalog payload
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the catalog document as JSON. Shape validation happens in the loader.
    async fn fetch_catalog(&self) -> Result<serde_json::Value, FetchError>;
}

/// Reachability check for a single feed resource
#[async_trait]
pub trait FeedProber: Send + Sync {
    /// Probe `url` without downloading its body.
    /// Non-success statuses are reported as `FetchError::Status`.
    async fn probe(&self, url: &str) -> Result<ProbeResponse, FetchError>;
}
