//! Catalog loader
//!
//! Turns the remote catalog document into feed descriptors. Any failure
//! (transport, status, malformed or empty payload) falls back to the
//! built-in list; there is no retry.

use crate::domain::entities::{CatalogOrigin, FeedDescriptor};
use crate::domain::ports::CatalogSource;
use crate::error::FetchError;

/// Feeds served when the remote catalog cannot be used
pub const FALLBACK_FEED_URLS: [&str; 3] = [
    "https://kgfixed.github.io/vocab.nerc.ac.uk/P02/latest.ttl",
    "https://kgfixed.github.io/vocab.nerc.ac.uk/P06/latest.ttl",
    "https://kgfixed.github.io/vocab.nerc.ac.uk/S25/latest.ttl",
];

pub fn fallback_catalog() -> Vec<FeedDescriptor> {
    FALLBACK_FEED_URLS
        .iter()
        .map(|url| FeedDescriptor::new(*url))
        .collect()
}

/// Outcome of a catalog load
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogLoad {
    pub descriptors: Vec<FeedDescriptor>,
    pub origin: CatalogOrigin,
}

/// Validate a catalog payload.
///
/// The payload must be an array. Entries whose `url` is missing or not a
/// string count as empty and are dropped, as are blank URLs after trimming.
/// A `null` entry rejects the whole payload.
pub fn parse_catalog(payload: &serde_json::Value) -> Result<Vec<FeedDescriptor>, FetchError> {
    let items = payload
        .as_array()
        .ok_or_else(|| FetchError::InvalidPayload("catalog payload must be an array".to_string()))?;

    let mut descriptors = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if item.is_null() {
            return Err(FetchError::InvalidPayload(format!(
                "catalog entry {} is null",
                i
            )));
        }

        let url = item
            .get("url")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .unwrap_or_default();

        if !url.is_empty() {
            descriptors.push(FeedDescriptor::new(url));
        }
    }

    if descriptors.is_empty() {
        return Err(FetchError::EmptyCatalog);
    }

    Ok(descriptors)
}

/// Fetch and validate the catalog, substituting the fallback list on failure
pub async fn load_catalog<CS>(source: &CS) -> CatalogLoad
where
    CS: CatalogSource + ?Sized,
{
    let result = match source.fetch_catalog().await {
        Ok(payload) => parse_catalog(&payload),
        Err(e) => Err(e),
    };

    match result {
        Ok(descriptors) => {
            tracing::info!("Loaded {} feeds from remote catalog", descriptors.len());
            CatalogLoad {
                descriptors,
                origin: CatalogOrigin::Remote,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to fetch catalog, using fallback list: {}", e);
            CatalogLoad {
                descriptors: fallback_catalog(),
                origin: CatalogOrigin::Fallback,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockCatalogResponse, MockCatalogSource};
    use serde_json::json;

    fn urls(descriptors: &[FeedDescriptor]) -> Vec<&str> {
        descriptors.iter().map(|d| d.url.as_str()).collect()
    }

    // ===== parse_catalog tests =====

    #[test]
    fn parse_trims_and_filters() {
        let payload = json!([{"url": "  https://a/ "}, {"url": ""}, {"url": 42}]);

        let descriptors = parse_catalog(&payload).unwrap();

        assert_eq!(urls(&descriptors), vec!["https://a/"]);
    }

    #[test]
    fn parse_preserves_order() {
        let payload = json!([
            {"url": "https://c/"},
            {"url": "https://a/"},
            {"url": "https://b/"}
        ]);

        let descriptors = parse_catalog(&payload).unwrap();

        assert_eq!(urls(&descriptors), vec!["https://c/", "https://a/", "https://b/"]);
    }

    #[test]
    fn parse_ignores_non_object_entries() {
        let payload = json!(["https://not-an-object/", 7, {"url": "https://ok/"}, {"name": "x"}]);

        let descriptors = parse_catalog(&payload).unwrap();

        assert_eq!(urls(&descriptors), vec!["https://ok/"]);
    }

    #[test]
    fn parse_rejects_non_array() {
        let result = parse_catalog(&json!({"url": "https://a/"}));
        assert!(matches!(result, Err(FetchError::InvalidPayload(_))));
    }

    #[test]
    fn parse_rejects_null_entry() {
        let result = parse_catalog(&json!([{"url": "https://a/"}, null]));
        assert!(matches!(result, Err(FetchError::InvalidPayload(msg)) if msg.contains("entry 1")));
    }

    #[test]
    fn parse_rejects_empty_result() {
        assert!(matches!(
            parse_catalog(&json!([])),
            Err(FetchError::EmptyCatalog)
        ));
        assert!(matches!(
            parse_catalog(&json!([{"url": "   "}, {"url": null}])),
            Err(FetchError::EmptyCatalog)
        ));
    }

    // ===== load_catalog tests =====

    #[tokio::test]
    async fn load_uses_remote_list_when_valid() {
        let source = MockCatalogSource::new(MockCatalogResponse::Json(json!([
            {"url": "https://one/"},
            {"url": " https://two/ "}
        ])));

        let load = load_catalog(&source).await;

        assert_eq!(load.origin, CatalogOrigin::Remote);
        assert_eq!(urls(&load.descriptors), vec!["https://one/", "https://two/"]);
    }

    #[tokio::test]
    async fn load_falls_back_when_offline() {
        let source = MockCatalogSource::new(MockCatalogResponse::Offline);

        let load = load_catalog(&source).await;

        assert_eq!(load.origin, CatalogOrigin::Fallback);
        assert_eq!(load.descriptors, fallback_catalog());
    }

    #[tokio::test]
    async fn load_falls_back_on_every_failure_kind() {
        let failures = vec![
            MockCatalogResponse::Status(500),
            MockCatalogResponse::Malformed,
            MockCatalogResponse::Json(json!({"feeds": []})),
            MockCatalogResponse::Json(json!([])),
        ];

        for failure in failures {
            let source = MockCatalogSource::new(failure);
            let load = load_catalog(&source).await;

            assert_eq!(load.origin, CatalogOrigin::Fallback);
            assert_eq!(urls(&load.descriptors), FALLBACK_FEED_URLS.to_vec());
        }
    }

    #[test]
    fn fallback_has_three_fixed_urls() {
        let fallback = fallback_catalog();
        assert_eq!(fallback.len(), 3);
        assert!(fallback.iter().all(|d| d.url.ends_with("/latest.ttl")));
    }
}
