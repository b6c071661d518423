//! Feed domain entities
//!
//! A feed is a remote Linked Data Event Stream identified by its URL.
//! The catalog hands out descriptors; the registry keeps one record per
//! loaded descriptor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry: just the feed URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedDescriptor {
    pub url: String,
}

impl FeedDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Registry record for a loaded feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedRecord {
    pub base_url: String,
    /// The fragment handed to the viewer; the feed URL doubles as its latest fragment
    pub latest_ttl_url: String,
    pub title: String,
    /// Set only once the feed has been probed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<FeedEnrichment>,
}

impl FeedRecord {
    /// Fresh record with no fetched data
    pub fn placeholder(url: &str) -> Self {
        Self {
            base_url: url.to_string(),
            latest_ttl_url: url.to_string(),
            title: url.to_string(),
            enrichment: None,
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.enrichment.is_some()
    }

    /// True when the last probe failed
    pub fn fetch_failed(&self) -> bool {
        matches!(
            self.enrichment,
            Some(FeedEnrichment {
                outcome: ProbeOutcome::Unreachable { .. },
                ..
            })
        )
    }
}

/// Metadata gathered by probing a feed's TTL resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEnrichment {
    pub probed_at: DateTime<Utc>,
    pub outcome: ProbeOutcome,
}

impl FeedEnrichment {
    pub fn new(outcome: ProbeOutcome) -> Self {
        Self {
            probed_at: Utc::now(),
            outcome,
        }
    }
}

/// Response headers of a successful probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Reachable(ProbeResponse),
    Unreachable { error: String },
}

impl ProbeOutcome {
    /// Short badge text for the UI
    pub fn label(&self) -> String {
        match self {
            ProbeOutcome::Reachable(resp) => format!("HTTP {}", resp.status),
            ProbeOutcome::Unreachable { .. } => "Fetch Failed".to_string(),
        }
    }
}

/// Where the current descriptor list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    /// Parsed from the remote catalog config
    Remote,
    /// Built-in list used after the remote fetch failed
    Fallback,
}

impl std::fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogOrigin::Remote => write!(f, "remote"),
            CatalogOrigin::Fallback => write!(f, "fallback"),
        }
    }
}

/// Unique identifier for a catalog refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefreshId(pub Uuid);

impl RefreshId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RefreshId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RefreshId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a completed catalog refresh
#[derive(Debug, Clone, Serialize)]
pub struct RefreshSummary {
    pub id: RefreshId,
    pub origin: CatalogOrigin,
    pub feed_count: usize,
    /// Number of feeds probed after loading
    pub probed: usize,
    pub completed_at: DateTime<Utc>,
}
