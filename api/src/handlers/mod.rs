//! HTTP handlers
//!
//! Axum request handlers for the catalog API and the HTML browser.

pub mod catalog;
pub mod pages;

pub use catalog::{get_catalog, get_feeds, get_selected, post_probe, post_refresh, post_select};
pub use pages::{index, ui_probe, ui_refresh, ui_select};
