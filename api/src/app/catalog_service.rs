//! Catalog service
//!
//! Owns the catalog store: descriptor list, feed registry, search query and
//! last refresh. `refresh`, `select`, `search` and `probe` are the only
//! mutators; handlers read through snapshots.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinSet;

use crate::app::catalog_loader::{fallback_catalog, load_catalog};
use crate::domain::entities::{
    CatalogOrigin, FeedDescriptor, FeedEnrichment, FeedRecord, ProbeOutcome, RefreshId,
    RefreshSummary,
};
use crate::domain::ports::{CatalogSource, FeedProber};
use crate::domain::{filter_descriptors, FeedRegistry};
use crate::error::{AppError, DomainError};

/// Read-only view of the catalog for rendering
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub query: String,
    /// Size of the unfiltered descriptor list
    pub total: usize,
    pub origin: CatalogOrigin,
    pub refreshing: bool,
    pub entries: Vec<CatalogEntry>,
    pub selected: Option<FeedRecord>,
    pub last_refresh: Option<RefreshSummary>,
}

/// A catalog row after filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub url: String,
    /// A registry record exists for this URL
    pub loaded: bool,
    /// This URL is the current selection
    pub active: bool,
}

struct CatalogState {
    descriptors: Vec<FeedDescriptor>,
    origin: CatalogOrigin,
    registry: FeedRegistry,
    query: String,
    last_refresh: Option<RefreshSummary>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            descriptors: fallback_catalog(),
            origin: CatalogOrigin::Fallback,
            registry: FeedRegistry::new(),
            query: String::new(),
            last_refresh: None,
        }
    }
}

/// Service coordinating the catalog loader, registry and probes
pub struct CatalogService<CS, FP>
where
    CS: CatalogSource + ?Sized,
    FP: FeedProber + ?Sized,
{
    catalog: Arc<CS>,
    prober: Arc<FP>,
    state: RwLock<CatalogState>,
    /// Held for the duration of a refresh
    refresh_token: Mutex<()>,
    probe_on_refresh: bool,
}

impl<CS, FP> CatalogService<CS, FP>
where
    CS: CatalogSource + ?Sized + 'static,
    FP: FeedProber + ?Sized + 'static,
{
    pub fn new(catalog: Arc<CS>, prober: Arc<FP>, probe_on_refresh: bool) -> Self {
        Self {
            catalog,
            prober,
            state: RwLock::new(CatalogState::default()),
            refresh_token: Mutex::new(()),
            probe_on_refresh,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_token.try_lock().is_err()
    }

    /// Reload the catalog from scratch.
    ///
    /// Clears the registry and selection, reloads descriptors, loads one
    /// record per descriptor and optionally probes them all concurrently.
    /// Rejected with a conflict while another refresh is running.
    pub async fn refresh(&self) -> Result<RefreshSummary, AppError> {
        let _token = self.refresh_token.try_lock().map_err(|_| {
            DomainError::Conflict("A catalog refresh is already running".to_string())
        })?;

        let id = RefreshId::new();
        tracing::info!(refresh_id = %id, "Refreshing catalog");

        self.state.write().await.registry.reset();

        let load = load_catalog(self.catalog.as_ref()).await;

        let urls: Vec<String> = {
            let mut guard = self.state.write().await;
            let state = &mut *guard;
            state.descriptors = load.descriptors;
            state.origin = load.origin;
            // Drop anything selected or probed while the fetch was in flight
            state.registry.reset();
            for descriptor in &state.descriptors {
                state.registry.load_feed(&descriptor.url, true);
            }
            state
                .registry
                .feeds()
                .iter()
                .map(|f| f.base_url.clone())
                .collect()
        };

        let probed = if self.probe_on_refresh {
            self.probe_all(urls.clone()).await
        } else {
            0
        };

        let summary = RefreshSummary {
            id,
            origin: load.origin,
            feed_count: urls.len(),
            probed,
            completed_at: Utc::now(),
        };

        self.state.write().await.last_refresh = Some(summary.clone());

        tracing::info!(
            refresh_id = %id,
            origin = %summary.origin,
            feeds = summary.feed_count,
            probed = summary.probed,
            "Catalog refresh complete"
        );

        Ok(summary)
    }

    /// Select a catalog feed, reloading its record
    pub async fn select(&self, url: &str) -> Result<FeedRecord, AppError> {
        let url = url.trim();
        let mut state = self.state.write().await;
        ensure_listed(&state.descriptors, url)?;

        state.registry.load_feed(url, true);
        state.registry.select_feed(url);
        tracing::debug!("Selected feed {}", url);

        state
            .registry
            .get(url)
            .cloned()
            .ok_or_else(|| DomainError::Internal(format!("record for {} vanished", url)).into())
    }

    /// Store the search query and return the filtered view
    pub async fn search(&self, query: &str) -> CatalogView {
        self.state.write().await.query = query.to_string();
        self.snapshot().await
    }

    /// Probe one catalog feed and attach the result to its record
    pub async fn probe(&self, url: &str) -> Result<FeedRecord, AppError> {
        let url = url.trim();
        {
            let mut state = self.state.write().await;
            ensure_listed(&state.descriptors, url)?;
            state.registry.load_feed(url, false);
        }

        let outcome = probe_outcome(self.prober.as_ref(), url).await;

        let mut state = self.state.write().await;
        // A refresh may have replaced the catalog while the probe was in flight
        ensure_listed(&state.descriptors, url)?;
        if !state.registry.is_loaded(url) {
            state.registry.load_feed(url, false);
        }
        state.registry.enrich(url, FeedEnrichment::new(outcome));

        state
            .registry
            .get(url)
            .cloned()
            .ok_or_else(|| DomainError::Internal(format!("record for {} vanished", url)).into())
    }

    pub async fn snapshot(&self) -> CatalogView {
        let state = self.state.read().await;
        let selected = state.registry.selected();

        let entries = filter_descriptors(&state.descriptors, &state.query)
            .into_iter()
            .map(|d| CatalogEntry {
                url: d.url.clone(),
                loaded: state.registry.is_loaded(&d.url),
                active: selected == Some(d.url.as_str()),
            })
            .collect();

        CatalogView {
            query: state.query.clone(),
            total: state.descriptors.len(),
            origin: state.origin,
            refreshing: self.is_refreshing(),
            entries,
            selected: state.registry.selected_record().cloned(),
            last_refresh: state.last_refresh.clone(),
        }
    }

    pub async fn feeds(&self) -> Vec<FeedRecord> {
        self.state.read().await.registry.feeds().to_vec()
    }

    pub async fn selected(&self) -> Option<FeedRecord> {
        self.state.read().await.registry.selected_record().cloned()
    }

    /// Fan out one probe per URL, then attach every result in one write
    async fn probe_all(&self, urls: Vec<String>) -> usize {
        let mut tasks = JoinSet::new();
        for url in urls {
            let prober = Arc::clone(&self.prober);
            tasks.spawn(async move {
                let outcome = probe_outcome(prober.as_ref(), &url).await;
                (url, outcome)
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => tracing::warn!("Probe task failed: {}", e),
            }
        }

        let mut state = self.state.write().await;
        results
            .into_iter()
            .filter(|(url, outcome)| {
                state
                    .registry
                    .enrich(url, FeedEnrichment::new(outcome.clone()))
            })
            .count()
    }
}

fn ensure_listed(descriptors: &[FeedDescriptor], url: &str) -> Result<(), DomainError> {
    if url.is_empty() {
        return Err(DomainError::Validation("feed url must not be empty".to_string()));
    }
    if !descriptors.iter().any(|d| d.url == url) {
        return Err(DomainError::NotFound(format!("feed {} is not in the catalog", url)));
    }
    Ok(())
}

async fn probe_outcome<FP>(prober: &FP, url: &str) -> ProbeOutcome
where
    FP: FeedProber + ?Sized,
{
    match prober.probe(url).await {
        Ok(response) => ProbeOutcome::Reachable(response),
        Err(e) => {
            tracing::warn!("Probe of {} failed: {}", url, e);
            ProbeOutcome::Unreachable {
                error: e.to_string(),
            }
        }
    }
}
