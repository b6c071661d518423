//! Page handlers
//!
//! The browser UI. Every action is a form post that redirects back to `/`,
//! so a reload never resubmits.

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::feed::render_page;
use crate::AppState;

use super::catalog::SearchQuery;

/// Form body naming a catalog feed
#[derive(Debug, Deserialize)]
pub struct FeedUrlForm {
    pub url: String,
}

/// GET /
///
/// Renders the catalog browser. A `q` parameter replaces the stored search query.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Html<String> {
    let view = match params.q {
        Some(q) => state.catalog_service.search(&q).await,
        None => state.catalog_service.snapshot().await,
    };

    Html(render_page(&view, &state.page))
}

/// POST /ui/select
pub async fn ui_select(
    State(state): State<AppState>,
    Form(form): Form<FeedUrlForm>,
) -> Result<Redirect, AppError> {
    state.catalog_service.select(&form.url).await?;
    Ok(Redirect::to("/"))
}

/// POST /ui/refresh
pub async fn ui_refresh(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.catalog_service.refresh().await?;
    Ok(Redirect::to("/"))
}

/// POST /ui/probe
pub async fn ui_probe(
    State(state): State<AppState>,
    Form(form): Form<FeedUrlForm>,
) -> Result<Redirect, AppError> {
    state.catalog_service.probe(&form.url).await?;
    Ok(Redirect::to("/"))
}
