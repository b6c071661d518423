//! Feed renderer
//!
//! Renders the catalog and feed records to plain-text markdown for
//! terminal and agent clients.

use crate::app::{CatalogEntry, CatalogView};
use crate::domain::entities::{
    CatalogOrigin, FeedEnrichment, FeedRecord, ProbeOutcome, RefreshSummary,
};

/// Viewer link for a feed: base plus the percent-encoded feed URL
pub fn viewer_url(viewer_base: &str, feed_url: &str) -> String {
    format!(
        "{}/{}",
        viewer_base.trim_end_matches('/'),
        urlencoding::encode(feed_url)
    )
}

/// Render the catalog list to markdown
pub fn render_catalog(view: &CatalogView) -> String {
    let mut buf = String::new();

    buf.push_str(&format!("# Catalog Of Feeds ({})\n\n", view.total));

    if view.origin == CatalogOrigin::Fallback {
        buf.push_str("_Remote catalog unavailable, showing the built-in list._\n\n");
    }
    if view.refreshing {
        buf.push_str("_Refreshing..._\n\n");
    }
    if !view.query.trim().is_empty() {
        buf.push_str(&format!("Search: `{}`\n\n", view.query.trim()));
    }

    if view.entries.is_empty() {
        if !view.refreshing {
            buf.push_str(&format!("_{}_\n", empty_catalog_message(&view.query)));
        }
    } else {
        for (i, entry) in view.entries.iter().enumerate() {
            buf.push_str(&render_entry(i + 1, entry));
        }
    }

    if let Some(summary) = &view.last_refresh {
        buf.push_str(&format!(
            "\nLast refresh: {}\n",
            summary.completed_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    buf
}

/// Text shown when the filtered catalog is empty
pub fn empty_catalog_message(query: &str) -> &'static str {
    if query.trim().is_empty() {
        "No repositories found. Try refresh to reload the catalog."
    } else {
        "No repositories match your search."
    }
}

fn render_entry(index: usize, entry: &CatalogEntry) -> String {
    let badge = if entry.loaded { "[Loaded]" } else { "[Idle]" };
    let marker = if entry.active { " <- selected" } else { "" };
    format!("{}. {} {}{}\n", index, badge, entry.url, marker)
}

/// Render the selected feed, or the empty state
pub fn render_selected(record: Option<&FeedRecord>, viewer_base: &str) -> String {
    let Some(record) = record else {
        return "# Select a Feed to Explore\n\n\
                Choose one of the Linked Data Event Streams from the catalog to \
                preview its latest members and metadata.\n"
            .to_string();
    };

    let mut buf = String::new();
    buf.push_str(&format!("# {}\n\n", record.title));
    buf.push_str(&format!("- **Open TTL:** {}\n", record.latest_ttl_url));
    buf.push_str(&format!(
        "- **Explorer:** {}\n",
        viewer_url(viewer_base, &record.latest_ttl_url)
    ));
    if let Some(enrichment) = &record.enrichment {
        buf.push_str(&render_enrichment(enrichment));
    }
    buf
}

/// Render registry records
pub fn render_feeds(records: &[FeedRecord]) -> String {
    let mut buf = String::new();

    buf.push_str("# Loaded Feeds\n\n");
    if records.is_empty() {
        buf.push_str("_No feeds loaded._\n");
        return buf;
    }

    for record in records {
        let status = record
            .enrichment
            .as_ref()
            .map(|e| e.outcome.label())
            .unwrap_or_else(|| "not probed".to_string());
        buf.push_str(&format!("- {} ({})\n", record.base_url, status));
    }

    buf
}

fn render_enrichment(enrichment: &FeedEnrichment) -> String {
    let probed_at = enrichment.probed_at.format("%Y-%m-%d %H:%M UTC");
    match &enrichment.outcome {
        ProbeOutcome::Reachable(resp) => {
            let mut line = format!("- **Probe:** HTTP {} at {}", resp.status, probed_at);
            if let Some(content_type) = &resp.content_type {
                line.push_str(&format!(" | {}", content_type));
            }
            if let Some(len) = resp.content_length {
                line.push_str(&format!(" | {} bytes", len));
            }
            line.push('\n');
            line
        }
        ProbeOutcome::Unreachable { error } => format!(
            "- **Probe:** Fetch Failed at {}\n    {}\n",
            probed_at,
            truncate(error, 120)
        ),
    }
}

/// Render a probed record
pub fn render_probe(record: &FeedRecord) -> String {
    let mut buf = format!("# Probe: {}\n\n", record.base_url);
    match &record.enrichment {
        Some(enrichment) => buf.push_str(&render_enrichment(enrichment)),
        None => buf.push_str("_Not probed._\n"),
    }
    buf
}

/// Render a refresh result
pub fn render_refresh(summary: &RefreshSummary) -> String {
    let mut buf = String::new();
    buf.push_str("# Catalog Refreshed\n\n");
    buf.push_str(&format!("- **Feeds:** {}\n", summary.feed_count));
    buf.push_str(&format!("- **Source:** {}\n", summary.origin));
    if summary.probed > 0 {
        buf.push_str(&format!("- **Probed:** {}\n", summary.probed));
    }
    buf.push_str(&format!("- **Refresh:** {}\n", summary.id));
    buf
}

/// Truncate a string with ellipsis, on a character boundary
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
