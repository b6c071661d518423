//! Catalog handlers
//!
//! JSON and plain-text endpoints over the catalog service.
//! Supports content negotiation: Accept: application/json for JSON, otherwise text/plain.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::FeedRecord;
use crate::error::AppError;
use crate::feed::{
    render_catalog, render_feeds, render_probe, render_refresh, render_selected, viewer_url,
};
use crate::AppState;

/// Check if the client wants JSON response
pub(crate) fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

fn plain_text(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

/// Query parameters for catalog search
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Request body naming a catalog feed
#[derive(Debug, Deserialize)]
pub struct FeedUrlRequest {
    pub url: String,
}

/// Selected feed with its explorer link
#[derive(Debug, Serialize)]
pub struct SelectedResponse {
    #[serde(flatten)]
    pub feed: FeedRecord,
    pub viewer_url: String,
}

impl SelectedResponse {
    fn new(feed: FeedRecord, viewer_base: &str) -> Self {
        let viewer_url = viewer_url(viewer_base, &feed.latest_ttl_url);
        Self { feed, viewer_url }
    }
}

/// GET /catalog
///
/// Returns the filtered catalog. A `q` parameter replaces the stored search query.
pub async fn get_catalog(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let view = match params.q {
        Some(q) => state.catalog_service.search(&q).await,
        None => state.catalog_service.snapshot().await,
    };

    if wants_json(&headers) {
        Ok(Json(view).into_response())
    } else {
        Ok(plain_text(render_catalog(&view)))
    }
}

/// GET /feeds
pub async fn get_feeds(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let feeds = state.catalog_service.feeds().await;

    if wants_json(&headers) {
        Ok(Json(feeds).into_response())
    } else {
        Ok(plain_text(render_feeds(&feeds)))
    }
}

/// GET /selected
///
/// JSON clients get `null` when nothing is selected.
pub async fn get_selected(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let selected = state.catalog_service.selected().await;
    let viewer_base = &state.config.viewer_base_url;

    if wants_json(&headers) {
        let body = selected.map(|feed| SelectedResponse::new(feed, viewer_base));
        Ok(Json(body).into_response())
    } else {
        Ok(plain_text(render_selected(selected.as_ref(), viewer_base)))
    }
}

/// POST /select
pub async fn post_select(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<FeedUrlRequest>,
) -> Result<Response, AppError> {
    let feed = state.catalog_service.select(&body.url).await?;
    let viewer_base = &state.config.viewer_base_url;

    if wants_json(&headers) {
        Ok(Json(SelectedResponse::new(feed, viewer_base)).into_response())
    } else {
        Ok(plain_text(render_selected(Some(&feed), viewer_base)))
    }
}

/// POST /refresh
///
/// 409 while another refresh is running.
pub async fn post_refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let summary = state.catalog_service.refresh().await?;

    if wants_json(&headers) {
        Ok((StatusCode::OK, Json(summary)).into_response())
    } else {
        Ok(plain_text(render_refresh(&summary)))
    }
}

/// POST /feeds/probe
pub async fn post_probe(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<FeedUrlRequest>,
) -> Result<Response, AppError> {
    let feed = state.catalog_service.probe(&body.url).await?;

    if wants_json(&headers) {
        Ok(Json(feed).into_response())
    } else {
        Ok(plain_text(render_probe(&feed)))
    }
}
