//! LDES Navigator
//!
//! Catalog browser for Linked Data Event Streams: loads a catalog of feed URLs,
//! keeps a registry of loaded feeds and hands the selected one to an external
//! explorer. Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::HttpFeedClient;
use app::CatalogService;
use config::Config;
use domain::ports::{CatalogSource, FeedProber};
use feed::PageContext;

/// Catalog service over type-erased upstream ports
pub type SharedCatalogService = CatalogService<dyn CatalogSource, dyn FeedProber>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<SharedCatalogService>,
    pub page: PageContext,
    pub config: Config,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        prober: Arc<dyn FeedProber>,
        config: Config,
    ) -> Self {
        let catalog_service = Arc::new(CatalogService::new(
            catalog,
            prober,
            config.probe_on_refresh,
        ));
        let page = PageContext {
            title: config.title.clone(),
            theme: config.theme,
            viewer_base_url: config.viewer_base_url.clone(),
        };

        Self {
            catalog_service,
            page,
            config,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router. Routes that reach upstream hosts are rate limited per
/// peer IP when enabled, which needs connect info on the serving side.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let mut upstream_routes = Router::new()
        .route("/refresh", post(handlers::post_refresh))
        .route("/feeds/probe", post(handlers::post_probe))
        .route("/ui/refresh", post(handlers::ui_refresh))
        .route("/ui/probe", post(handlers::ui_probe));

    if state.config.rate_limit_enabled {
        // 2 req/sec sustained, burst of 5
        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(2)
                .burst_size(5)
                .finish()
                .context("Failed to build governor config")?,
        );
        upstream_routes = upstream_routes.layer(GovernorLayer {
            config: governor_config,
        });
    }

    let app = Router::new()
        .route("/health", get(health))
        // Browser UI
        .route("/", get(handlers::index))
        .route("/ui/select", post(handlers::ui_select))
        // Catalog API
        .route("/catalog", get(handlers::get_catalog))
        .route("/feeds", get(handlers::get_feeds))
        .route("/selected", get(handlers::get_selected))
        .route("/select", post(handlers::post_select))
        .merge(upstream_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ldes_navigator_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LDES Navigator...");

    // Load configuration
    let config = Config::from_env();
    tracing::info!(viewer = %config.viewer_base_url, "Configuration loaded");

    // One client serves both the catalog fetch and the feed probes
    let client = Arc::new(
        HttpFeedClient::new(
            config.catalog_url.clone(),
            Duration::from_secs(config.fetch_timeout_secs),
        )
        .context("Failed to build HTTP client")?,
    );
    tracing::info!("Catalog source: {}", client.catalog_url());
    let catalog: Arc<dyn CatalogSource> = client.clone();
    let prober: Arc<dyn FeedProber> = client;

    let port = config.port;
    let state = AppState::new(catalog, prober, config);

    // Initial catalog load runs in the background; the fallback list is served meanwhile
    let service = state.catalog_service.clone();
    tokio::spawn(async move {
        if let Err(e) = service.refresh().await {
            tracing::warn!("Initial catalog refresh failed: {}", e);
        }
    });

    let app = build_router(state)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
