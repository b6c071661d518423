//! Feed registry
//!
//! Ordered, in-memory collection of feed records keyed by URL, plus the
//! current selection. All transitions are synchronous state changes; nothing
//! here performs I/O.

use serde::Serialize;

use super::entities::{FeedDescriptor, FeedEnrichment, FeedRecord};

#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedRegistry {
    feeds: Vec<FeedRecord>,
    selected: Option<String>,
}

impl FeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feeds(&self) -> &[FeedRecord] {
        &self.feeds
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn get(&self, url: &str) -> Option<&FeedRecord> {
        self.feeds.iter().find(|f| f.base_url == url)
    }

    pub fn is_loaded(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    /// Record for the current selection, if it has one
    pub fn selected_record(&self) -> Option<&FeedRecord> {
        self.selected.as_deref().and_then(|url| self.get(url))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Load a placeholder record for `url`.
    ///
    /// An enriched record is kept unless `force_refresh` is set. Otherwise any
    /// existing record is dropped and a fresh one is appended at the end.
    /// Returns whether the registry changed.
    pub fn load_feed(&mut self, url: &str, force_refresh: bool) -> bool {
        if !force_refresh && self.get(url).is_some_and(FeedRecord::is_enriched) {
            return false;
        }

        self.feeds.retain(|f| f.base_url != url);
        self.feeds.push(FeedRecord::placeholder(url));
        true
    }

    pub fn select_feed(&mut self, url: &str) {
        self.selected = Some(url.to_string());
    }

    /// Drop every record and clear the selection
    pub fn reset(&mut self) {
        self.feeds.clear();
        self.selected = None;
    }

    /// Attach probe results to an existing record
    pub fn enrich(&mut self, url: &str, enrichment: FeedEnrichment) -> bool {
        match self.feeds.iter_mut().find(|f| f.base_url == url) {
            Some(record) => {
                record.enrichment = Some(enrichment);
                true
            }
            None => false,
        }
    }
}

/// Case-insensitive substring match of `query` against descriptor URLs.
/// A blank query matches everything.
pub fn filter_descriptors<'a>(
    descriptors: &'a [FeedDescriptor],
    query: &str,
) -> Vec<&'a FeedDescriptor> {
    let needle = query.trim().to_lowercase();
    descriptors
        .iter()
        .filter(|d| d.url.to_lowercase().contains(&needle))
        .collect()
}
