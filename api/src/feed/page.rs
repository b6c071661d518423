//! HTML page
//!
//! Server-rendered catalog browser: catalog list on the left, detail panel
//! with the embedded explorer on the right. Works without JavaScript; every
//! interaction is a plain form submission.

use std::fmt;

use html_escaper::HtmlEscaper;

/// Display adapter that HTML-escapes the wrapped value via `html_escaper`
struct Escape<'a, T: fmt::Display + ?Sized>(&'a T);

impl<T: fmt::Display + ?Sized> fmt::Display for Escape<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_fmt(&mut HtmlEscaper(f), format_args!("{}", self.0))
    }
}

use crate::app::{CatalogEntry, CatalogView};
use crate::domain::entities::{CatalogOrigin, FeedRecord, Theme};

use super::renderer::{empty_catalog_message, truncate, viewer_url};

/// Iframe sandbox: no top navigation, no popups
pub const VIEWER_SANDBOX: &str = "allow-scripts allow-same-origin allow-forms";

/// Widest base URL shown on a feed card
const CARD_URL_WIDTH: usize = 48;

/// Page-level settings taken from config
#[derive(Debug, Clone)]
pub struct PageContext {
    pub title: String,
    pub theme: Theme,
    pub viewer_base_url: String,
}

/// Render the full page
pub fn render_page(view: &CatalogView, ctx: &PageContext) -> String {
    let mut buf = String::new();

    buf.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    buf.push_str("<meta charset=\"utf-8\">\n");
    buf.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    buf.push_str(&format!("<title>{}</title>\n", Escape(&ctx.title)));
    buf.push_str(&format!(
        "<style>:root{{{}}}{}</style>\n",
        ctx.theme.css_variables(),
        STYLESHEET
    ));
    buf.push_str("</head>\n");
    buf.push_str(&format!("<body class=\"theme-{}\">\n", ctx.theme));

    buf.push_str(&render_navbar(&view.query, ctx));

    buf.push_str("<main>\n");
    buf.push_str(&render_catalog_list(view));
    buf.push_str(&render_detail_panel(view.selected.as_ref(), &ctx.viewer_base_url));
    buf.push_str("</main>\n");

    buf.push_str("<footer>LDES Navigator made by vliz-be-opsci</footer>\n");
    buf.push_str("</body>\n</html>\n");

    buf
}

fn render_navbar(query: &str, ctx: &PageContext) -> String {
    format!(
        "<nav>\n<span class=\"brand\">{}</span>\n\
         <form class=\"search\" method=\"get\" action=\"/\">\
         <input type=\"text\" name=\"q\" value=\"{}\" placeholder=\"Search repositories...\">\
         </form>\n\
         <form method=\"post\" action=\"/ui/refresh\"><button type=\"submit\">Refresh</button></form>\n\
         </nav>\n",
        Escape(&ctx.title),
        Escape(query)
    )
}

/// Left panel: filtered catalog with loaded/idle badges
pub fn render_catalog_list(view: &CatalogView) -> String {
    let mut buf = String::new();

    buf.push_str("<section class=\"catalog\">\n");
    buf.push_str(&format!(
        "<header><h2>KgFixed Catalog Of Feeds</h2><span class=\"count\">{}</span></header>\n",
        view.total
    ));

    if view.origin == CatalogOrigin::Fallback {
        buf.push_str("<p class=\"notice\">Remote catalog unavailable, showing the built-in list.</p>\n");
    }
    if view.refreshing {
        buf.push_str("<p class=\"notice\">Refreshing...</p>\n");
    }

    for entry in &view.entries {
        buf.push_str(&render_catalog_entry(entry));
    }

    if view.entries.is_empty() && !view.refreshing {
        buf.push_str(&format!(
            "<div class=\"empty\">{}</div>\n",
            empty_catalog_message(&view.query)
        ));
    }

    buf.push_str("</section>\n");
    buf
}

fn render_catalog_entry(entry: &CatalogEntry) -> String {
    let class = if entry.active { "entry active" } else { "entry" };
    let (badge_class, badge) = if entry.loaded {
        ("badge loaded", "Loaded")
    } else {
        ("badge idle", "Idle")
    };
    let url = Escape(&entry.url);

    format!(
        "<form class=\"{}\" method=\"post\" action=\"/ui/select\">\
         <input type=\"hidden\" name=\"url\" value=\"{}\">\
         <button type=\"submit\"><small>Repository</small><strong>{}</strong>\
         <span class=\"{}\">{}</span></button></form>\n",
        class, url, url, badge_class, badge
    )
}

/// Right panel: empty state, or the selected feed with its explorer iframe
pub fn render_detail_panel(selected: Option<&FeedRecord>, viewer_base_url: &str) -> String {
    let Some(feed) = selected else {
        return "<section class=\"detail empty-state\">\n\
                <h3>Select a Feed to Explore</h3>\n\
                <p>Choose one of the Linked Data Event Streams from the left sidebar to \
                preview its latest members and metadata.</p>\n\
                </section>\n"
            .to_string();
    };

    let mut buf = String::new();
    buf.push_str("<section class=\"detail\">\n");
    buf.push_str("<span class=\"eyebrow\">Selected Fragment Explorer</span>\n");
    buf.push_str(&format!("<h1>{}</h1>\n", Escape(&feed.title)));
    buf.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">Open TTL</a>\n",
        Escape(&feed.latest_ttl_url)
    ));
    buf.push_str(&render_feed_card(feed));
    buf.push_str(&format!(
        "<iframe title=\"LDES Explorer\" src=\"{}\" referrerpolicy=\"no-referrer\" sandbox=\"{}\"></iframe>\n",
        Escape(&viewer_url(viewer_base_url, &feed.latest_ttl_url)),
        VIEWER_SANDBOX
    ));
    buf.push_str("</section>\n");
    buf
}

/// Compact card with probe status and a truncated base URL
pub fn render_feed_card(feed: &FeedRecord) -> String {
    let status = match &feed.enrichment {
        Some(enrichment) => enrichment.outcome.label(),
        None => "Not probed".to_string(),
    };

    let mut buf = String::new();
    buf.push_str("<div class=\"card\">\n");
    buf.push_str("<p>No description provided for this stream.</p>\n");
    buf.push_str(&format!(
        "<div class=\"meta\"><span class=\"pill\">{}</span>",
        Escape(&status)
    ));
    if feed.fetch_failed() {
        buf.push_str("<span class=\"failed\">Fetch Failed</span>");
    }
    buf.push_str(&format!(
        "<span class=\"mono\" title=\"{}\">{}</span></div>\n",
        Escape(&feed.base_url),
        Escape(&truncate(&feed.base_url, CARD_URL_WIDTH))
    ));
    buf.push_str(&format!(
        "<form method=\"post\" action=\"/ui/probe\">\
         <input type=\"hidden\" name=\"url\" value=\"{}\">\
         <button type=\"submit\">Probe</button></form>\n",
        Escape(&feed.base_url)
    ));
    buf.push_str("</div>\n");
    buf
}

const STYLESHEET: &str = "\
*{box-sizing:border-box}\
body{margin:0;font-family:'Space Grotesk',system-ui,-apple-system,sans-serif;background:var(--bg);color:var(--text)}\
nav{position:sticky;top:0;display:flex;gap:1rem;align-items:center;padding:0 2rem;height:4rem;background:var(--panel);border-bottom:1px solid var(--border)}\
nav .brand{font-weight:900;font-size:1.25rem;margin-right:auto}\
nav input{width:16rem;padding:.5rem 1rem;border-radius:999px;border:1px solid var(--border);background:var(--bg);color:var(--text)}\
button{cursor:pointer;font:inherit;color:inherit}\
main{display:grid;grid-template-columns:1fr 2fr;gap:2rem;max-width:1600px;margin:0 auto;padding:2rem}\
.catalog header{display:flex;justify-content:space-between;align-items:center}\
.catalog h2{font-size:.85rem;text-transform:uppercase;letter-spacing:.1em;color:var(--muted)}\
.count{font-size:.75rem;font-weight:700;padding:.1rem .5rem;border-radius:999px;background:var(--idle-bg)}\
.entry button{display:block;width:100%;text-align:left;margin:.5rem 0;padding:1rem;border-radius:1rem;border:1px solid var(--border);background:var(--panel)}\
.entry.active button{border-color:var(--accent)}\
.entry small{display:block;text-transform:uppercase;letter-spacing:.1em;color:var(--muted)}\
.entry strong{display:block;word-break:break-all;margin:.25rem 0}\
.badge{font-size:.65rem;font-weight:700;text-transform:uppercase;padding:.2rem .5rem;border-radius:999px}\
.badge.loaded{background:var(--loaded-bg);color:var(--loaded-fg)}\
.badge.idle{background:var(--idle-bg);color:var(--idle-fg)}\
.notice,.empty{color:var(--muted)}\
.empty{text-align:center;padding:3rem 1rem;border:2px dashed var(--border);border-radius:.75rem}\
.detail{background:var(--panel);border:1px solid var(--border);border-radius:1rem;padding:2rem}\
.detail.empty-state{text-align:center;border-style:dashed;color:var(--muted)}\
.detail a{color:var(--accent)}\
.eyebrow{font-size:.75rem;font-weight:700;text-transform:uppercase;color:var(--accent)}\
.card{margin:1rem 0;padding:1rem;border:1px solid var(--border);border-radius:.75rem}\
.meta{display:flex;gap:.5rem;align-items:center;font-size:.75rem}\
.pill{padding:.1rem .5rem;border-radius:999px;border:1px solid var(--border)}\
.failed{color:var(--error);font-weight:600}\
.mono{font-family:'JetBrains Mono',monospace;opacity:.6}\
iframe{width:100%;height:640px;border:1px solid var(--border);border-radius:1rem;background:#fff}\
footer{margin-top:5rem;padding:3rem;text-align:center;color:var(--muted);border-top:1px solid var(--border)}\
";
