//! Feed module
//!
//! Catalog and feed rendering: markdown for text clients, HTML for browsers.

pub mod page;
pub mod renderer;

pub use page::{render_page, PageContext};
pub use renderer::{
    render_catalog, render_feeds, render_probe, render_refresh, render_selected, viewer_url,
};
