//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::config::Config;
use crate::domain::entities::{
    FeedEnrichment, FeedRecord, ProbeOutcome, ProbeResponse, Theme,
};

/// A remote catalog payload with three feeds
pub fn sample_catalog_json() -> serde_json::Value {
    serde_json::json!([
        {"url": "https://example.org/ldes/alpha.ttl"},
        {"url": "https://example.org/ldes/beta.ttl"},
        {"url": "https://example.org/ldes/gamma.ttl"}
    ])
}

/// Configuration with rate limiting off and a local viewer
pub fn test_config() -> Config {
    Config {
        catalog_url: "http://catalog.test/feeds.json".to_string(),
        viewer_base_url: "https://viewer.test/ldes".to_string(),
        title: "Test Navigator".to_string(),
        theme: Theme::Light,
        fetch_timeout_secs: 1,
        probe_on_refresh: false,
        rate_limit_enabled: false,
        port: 0,
    }
}

/// A loaded record with no probe data
pub fn test_record(url: &str) -> FeedRecord {
    FeedRecord::placeholder(url)
}

/// A record whose probe succeeded
pub fn test_reachable_record(url: &str) -> FeedRecord {
    FeedRecord {
        enrichment: Some(FeedEnrichment::new(ProbeOutcome::Reachable(ProbeResponse {
            status: 200,
            content_type: Some("text/turtle".to_string()),
            content_length: Some(2048),
        }))),
        ..FeedRecord::placeholder(url)
    }
}

/// A record whose probe failed
pub fn test_failed_record(url: &str) -> FeedRecord {
    FeedRecord {
        enrichment: Some(FeedEnrichment::new(ProbeOutcome::Unreachable {
            error: "Upstream returned 404: Not Found".to_string(),
        })),
        ..FeedRecord::placeholder(url)
    }
}
